//! Unauthenticated account endpoints: login, sign-up and password reset.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use orderlink_auth::BearerToken;
use orderlink_core::{EmailAddress, NewPassword, RegisterRequest, ResetCode};

use crate::api::{ApiClient, execute, execute_empty};
use crate::error::ApiError;
use crate::types::{LoginRequest, LoginResponse, PasswordResetToken};

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyCodeBody<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyCodeResponse {
    #[serde(default)]
    password_reset_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordBody<'a> {
    password_reset_token: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    /// `POST /auth/login`. `identifier` is an e-mail or CPF.
    ///
    /// A 2xx answer without a non-empty `token` is reported as
    /// [`ApiError::MissingToken`].
    pub async fn login(&self, identifier: &str, password: &str) -> Result<BearerToken, ApiError> {
        let body = LoginRequest {
            identifier,
            password,
        };
        let response: LoginResponse = execute(self.request(Method::POST, "auth/login").json(&body)).await?;
        match response.token {
            Some(token) if !token.is_empty() => Ok(BearerToken::new(token)),
            _ => Err(ApiError::MissingToken),
        }
    }

    /// `POST /auth/register` with a payload from
    /// [`orderlink_core::RegistrationForm::validate`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        tracing::info!(kind = %request.tipo_empresa, "registering account");
        execute_empty(self.request(Method::POST, "auth/register").json(request)).await
    }

    /// Ask the backend to e-mail a reset code.
    pub async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), ApiError> {
        let body = EmailBody {
            email: email.as_str(),
        };
        execute_empty(self.request(Method::POST, "auth/request-password-reset").json(&body)).await
    }

    /// Exchange the e-mailed code for a reset token.
    pub async fn verify_reset_code(
        &self,
        email: &EmailAddress,
        code: &ResetCode,
    ) -> Result<PasswordResetToken, ApiError> {
        let body = VerifyCodeBody {
            email: email.as_str(),
            code: code.as_str(),
        };
        let response: VerifyCodeResponse =
            execute(self.request(Method::POST, "auth/verify-reset-code").json(&body)).await?;
        match response.password_reset_token {
            Some(token) if !token.is_empty() => Ok(PasswordResetToken::new(token)),
            _ => Err(ApiError::Parse("response did not include passwordResetToken".to_string())),
        }
    }

    pub async fn reset_password(
        &self,
        token: &PasswordResetToken,
        password: &NewPassword,
    ) -> Result<(), ApiError> {
        let body = ResetPasswordBody {
            password_reset_token: token.expose(),
            new_password: password.expose(),
        };
        execute_empty(self.request(Method::POST, "auth/reset-password-with-token").json(&body)).await
    }
}
