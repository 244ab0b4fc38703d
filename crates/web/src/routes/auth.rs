//! Authentication route handlers.
//!
//! Login, registration, forgot-password, and logout. The session writes and
//! the `user` mirror cookie always come from the auth service together;
//! handlers only decide where to send the user next.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;

use vendora_client::{Address, AuthApi, RegisterRequest};
use vendora_core::Role;

use crate::filters;
use crate::routes::{MessageQuery, flash_redirect};
use crate::services::auth::{self, RegisterOutcome};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data. The identifier may be a username or an email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
}

/// Registration form data: personal details, address, and the store fields
/// only vendors fill in.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_description: String,
    #[serde(default)]
    pub specialty: String,
}

impl RegisterForm {
    fn is_vendor(&self) -> bool {
        self.role.as_deref() == Some("VENDOR")
    }
}

/// Per-field validation errors rendered inline on the registration form.
#[derive(Default)]
pub struct RegisterErrors {
    pub username: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone_number: Option<&'static str>,
    pub password: Option<&'static str>,
    pub password_confirm: Option<&'static str>,
    pub store_name: Option<&'static str>,
    pub store_description: Option<&'static str>,
}

impl RegisterErrors {
    fn validate(form: &RegisterForm) -> Self {
        let mut errors = Self::default();
        if form.username.trim().is_empty() {
            errors.username = Some("Username is required");
        }
        if form.email.trim().is_empty() || !form.email.contains('@') {
            errors.email = Some("A valid email address is required");
        }
        if form.phone_number.trim().is_empty() {
            errors.phone_number = Some("Phone number is required");
        }
        if form.password.len() < 8 {
            errors.password = Some("Password must be at least 8 characters");
        }
        if form.password != form.password_confirm {
            errors.password_confirm = Some("Passwords do not match");
        }
        if form.is_vendor() {
            if form.store_name.trim().is_empty() {
                errors.store_name = Some("Store name is required");
            }
            if form.store_description.trim().is_empty() {
                errors.store_description = Some("Store description is required");
            }
        }
        errors
    }

    fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.password.is_none()
            && self.password_confirm.is_none()
            && self.store_name.is_none()
            && self.store_description.is_none()
    }
}

/// Forgot password form data.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub form: RegisterForm,
    pub errors: RegisterErrors,
}

/// Forgot password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/forgot_password.html")]
pub struct ForgotPasswordTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// On success the caller is redirected by role: customers to the home page,
/// vendors and admins to their dashboards.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let identifier = form.identifier.trim();
    if identifier.is_empty() || form.password.is_empty() {
        return flash_redirect("/login", "error", "Username and password are required")
            .into_response();
    }

    match auth::login(state.api(), &session, identifier, &form.password).await {
        Ok((user, cookie)) => {
            let target = match user.role {
                Role::Customer => "/",
                role => role.dashboard_path(),
            };
            (jar.add(cookie), Redirect::to(target)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "login failed");
            flash_redirect("/login", "error", &e.to_string()).into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error,
        form: RegisterForm::default(),
        errors: RegisterErrors::default(),
    }
}

/// Handle registration form submission.
///
/// Field validation happens before any network call; failures re-render
/// the form with inline errors. On success the backend either returns a
/// token (auto-login) or a message shown on the login page.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let errors = RegisterErrors::validate(&form);
    if !errors.is_empty() {
        return RegisterTemplate {
            error: None,
            form,
            errors,
        }
        .into_response();
    }

    let role = if form.is_vendor() {
        Role::Vendor
    } else {
        Role::Customer
    };
    let address = (!form.street.trim().is_empty()).then(|| Address {
        country: form.country.trim().to_owned(),
        state: form.state.trim().to_owned(),
        city: form.city.trim().to_owned(),
        zip_code: form.zip_code.trim().to_owned(),
        street: form.street.trim().to_owned(),
        is_default: Some(true),
    });

    let payload = RegisterRequest {
        username: form.username.trim().to_owned(),
        first_name: form.first_name.trim().to_owned(),
        last_name: form.last_name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone_number: form.phone_number.trim().to_owned(),
        password: form.password.clone(),
        role,
        address,
        store_name: form.is_vendor().then(|| form.store_name.trim().to_owned()),
        store_description: form
            .is_vendor()
            .then(|| form.store_description.trim().to_owned()),
        specialty: (form.is_vendor() && !form.specialty.trim().is_empty())
            .then(|| form.specialty.trim().to_owned()),
    };

    match auth::register(state.api(), &session, &payload).await {
        Ok(RegisterOutcome::AutoAuthenticated { user, cookie }) => {
            let target = match user.role {
                Role::Customer => "/",
                role => role.dashboard_path(),
            };
            (jar.add(cookie), Redirect::to(target)).into_response()
        }
        Ok(RegisterOutcome::Registered { message }) => {
            flash_redirect("/login", "success", &message).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            RegisterTemplate {
                error: Some(e.to_string()),
                form,
                errors: RegisterErrors::default(),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Password Reset Routes
// =============================================================================

/// Display the forgot password page.
pub async fn forgot_password_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    ForgotPasswordTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle forgot password form submission.
///
/// Always shows success to prevent email enumeration.
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        return flash_redirect("/forgot-password", "error", "A valid email address is required")
            .into_response();
    }

    if let Err(e) = state.api().forgot_password(email).await {
        tracing::warn!(error = %e, "password reset request failed");
        // Still show success to prevent email enumeration
    }

    flash_redirect(
        "/forgot-password",
        "success",
        "If that address exists, a reset email is on its way",
    )
    .into_response()
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout: clear the session, clear the mirror cookie, go home.
pub async fn logout(session: Session, jar: CookieJar) -> Response {
    let removal = auth::logout(&session).await;
    (jar.add(removal), Redirect::to("/")).into_response()
}
