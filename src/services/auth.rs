//! Fluxos de autenticação: login, logout e a troca obrigatória de senha.

use crate::auth::policy::{self, Route};
use crate::auth::session::Role;
use crate::errors::AppError;
use crate::gateway::ApiClient;
use crate::models::user::{ChangePasswordPayload, ChangePasswordResponse, LoginResponse};
use crate::validation::{validate_password, validate_password_confirmation};
use crate::{log_info, log_warn};

/// Resultado do login: sessão já gravada, rota de destino resolvida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub display_name: String,
    pub next: Route,
}

/// Nome de exibição: o backend pode mandar em três lugares diferentes;
/// sem nenhum, cai na parte local do email.
fn resolve_display_name(resp: &LoginResponse, email: &str) -> String {
    let candidates = [
        resp.name.as_deref(),
        resp.user_name.as_deref(),
        resp.user.as_ref().and_then(|u| u.name.as_deref()),
    ];

    for candidate in candidates.into_iter().flatten() {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    email.split('@').next().unwrap_or_default().trim().to_string()
}

/// Autentica e grava a sessão. A rota de destino depende da resposta:
/// troca obrigatória de senha primeiro, senão a seção inicial do perfil.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Informe email e senha.".into()));
    }

    let resp: LoginResponse = api
        .post_query(
            "/auth/login",
            &[("email", email), ("password", password)],
            "Email ou senha inválidos",
        )
        .await
        .map_err(|err| match err {
            // 401 no login é credencial errada, não sessão expirada
            AppError::SessionExpired => AppError::Auth("Email ou senha inválidos".into()),
            other => other,
        })?;

    let display_name = resolve_display_name(&resp, email);
    api.session().login(&resp.token, &resp.role, &display_name);

    let next = if resp.must_change_password {
        Route::TrocarSenha
    } else {
        policy::default_route(Role::parse(&resp.role))
    };

    log_info!("AUTH", &format!("Login efetuado, perfil {}", resp.role));
    Ok(LoginOutcome { display_name, next })
}

/// Encerra a sessão. O POST é melhor esforço: falha de rede não impede a
/// limpeza local.
pub async fn logout(api: &ApiClient) {
    if api.post_empty("/auth/logout", "Falha ao sair").await.is_err() {
        log_warn!("AUTH", "Logout remoto falhou, limpando só a sessão local");
    }
    api.session().clear();
}

/// Troca a senha no fluxo obrigatório. Valida a política localmente antes
/// de chamar o backend; no sucesso, re-sincroniza perfil e nome na sessão
/// e devolve a seção inicial do perfil atual.
pub async fn change_password(
    api: &ApiClient,
    new_password: &str,
    confirm: &str,
) -> Result<Route, AppError> {
    validate_password(new_password).map_err(AppError::Validation)?;
    validate_password_confirmation(new_password, confirm).map_err(AppError::Validation)?;

    let payload = ChangePasswordPayload {
        new_password: new_password.to_string(),
    };

    let resp: ChangePasswordResponse = api
        .post_json("/auth/change-password", &payload, "Erro ao salvar nova senha.")
        .await?;

    if let Some(role) = resp.role.as_deref() {
        api.session().update_role(role);
    }
    if let Some(name) = resp.name.as_deref() {
        api.session().update_name(name);
    }

    Ok(policy::default_route(api.session().role()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::LoginUser;

    fn response(name: Option<&str>, user_name: Option<&str>, user: Option<&str>) -> LoginResponse {
        LoginResponse {
            token: "tok".into(),
            role: "seller".into(),
            must_change_password: false,
            name: name.map(String::from),
            user_name: user_name.map(String::from),
            user: user.map(|n| LoginUser {
                name: Some(n.to_string()),
            }),
        }
    }

    #[test]
    fn display_name_prefers_name_field() {
        let resp = response(Some(" Maria "), Some("outra"), Some("terceira"));
        assert_eq!(resolve_display_name(&resp, "x@loja.com"), "Maria");
    }

    #[test]
    fn display_name_falls_through_empty_fields() {
        let resp = response(Some("  "), None, Some("Ana"));
        assert_eq!(resolve_display_name(&resp, "x@loja.com"), "Ana");
    }

    #[test]
    fn display_name_defaults_to_email_local_part() {
        let resp = response(None, None, None);
        assert_eq!(resolve_display_name(&resp, "maria.s@loja.com"), "maria.s");
    }
}
