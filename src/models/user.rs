use serde::{Deserialize, Serialize};

/// Resposta de login. O backend pode mandar o nome em campos diferentes
/// (ou não mandar); a resolução fica em `services::auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub must_change_password: bool,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub name: Option<String>,
}

/// Resposta da troca de senha: role/nome opcionais para re-sincronizar
/// a sessão.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordResponse {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordPayload {
    pub new_password: String,
}
