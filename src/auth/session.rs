use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::log_warn;

/// Chaves canônicas gravadas pela sessão atual.
pub const KEY_TOKEN: &str = "token";
pub const KEY_ROLE: &str = "role";
pub const KEY_USER_NAME: &str = "user_name";

/// Cadeias de fallback para instalações antigas que gravaram a sessão
/// sob outras chaves. A primeira não-vazia vence.
const ROLE_KEYS: [&str; 3] = [KEY_ROLE, "user_role", "perfil"];
const NAME_KEYS: [&str; 4] = [KEY_USER_NAME, "name", "username", "user"];

/// Perfil de acesso. Qualquer valor fora dos três conhecidos vira
/// `Unknown` (menor privilégio).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Gerente,
    Seller,
    Unknown,
}

impl Role {
    /// Deriva o perfil de um valor bruto: trim + minúsculas.
    pub fn parse(raw: &str) -> Role {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "gerente" => Role::Gerente,
            "seller" => Role::Seller,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Gerente => "gerente",
            Role::Seller => "seller",
            Role::Unknown => "unknown",
        }
    }
}

type RoleListener = Box<dyn Fn(Role) + Send + Sync>;

/// Sessão do processo: token, perfil e nome de exibição, persistidos como
/// um mapa chave/valor (o equivalente do storage do navegador no sistema
/// original). Token ausente = deslogado.
pub struct SessionStore {
    path: Option<PathBuf>,
    values: Mutex<HashMap<String, String>>,
    listeners: Mutex<Vec<RoleListener>>,
}

impl SessionStore {
    /// Sessão volátil, sem persistência (testes e ferramentas).
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(HashMap::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Carrega a sessão persistida; arquivo ausente ou corrompido vira
    /// sessão vazia (deslogado).
    pub fn load(path: PathBuf) -> Self {
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<HashMap<String, String>>(&content).ok())
            .unwrap_or_default();

        Self {
            path: Some(path),
            values: Mutex::new(values),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        let Some(path) = &self.path else { return };

        let result = serde_json::to_string_pretty(values)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));

        if result.is_err() {
            log_warn!("SESSION", "Falha ao persistir a sessão em disco");
        }
    }

    /// Valor bruto de uma chave (vazio conta como ausente).
    pub fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap();
        values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn first_non_empty(&self, keys: &[&str]) -> Option<String> {
        let values = self.values.lock().unwrap();
        keys.iter().find_map(|k| {
            values
                .get(*k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
    }

    pub fn token(&self) -> Option<String> {
        self.get(KEY_TOKEN)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Acessor único do perfil atual: aplica a cadeia de fallback e a
    /// normalização em um só lugar.
    pub fn role(&self) -> Role {
        self.first_non_empty(&ROLE_KEYS)
            .map(|raw| Role::parse(&raw))
            .unwrap_or(Role::Unknown)
    }

    /// Nome de exibição do usuário logado, já aparado.
    pub fn user_name(&self) -> Option<String> {
        self.first_non_empty(&NAME_KEYS)
    }

    /// Grava a sessão após o login.
    pub fn login(&self, token: &str, role: &str, user_name: &str) {
        {
            let mut values = self.values.lock().unwrap();
            values.insert(KEY_TOKEN.to_string(), token.to_string());
            values.insert(KEY_ROLE.to_string(), role.to_string());
            values.insert(KEY_USER_NAME.to_string(), user_name.to_string());
            self.persist(&values);
        }
        self.notify();
    }

    /// Re-sincroniza o perfil (ex.: após troca de senha).
    pub fn update_role(&self, role: &str) {
        {
            let mut values = self.values.lock().unwrap();
            values.insert(KEY_ROLE.to_string(), role.to_string());
            self.persist(&values);
        }
        self.notify();
    }

    /// Re-sincroniza o nome de exibição.
    pub fn update_name(&self, user_name: &str) {
        let mut values = self.values.lock().unwrap();
        values.insert(KEY_USER_NAME.to_string(), user_name.to_string());
        self.persist(&values);
    }

    /// Limpa a sessão (logout ou 401): remove token, perfil e nome.
    pub fn clear(&self) {
        {
            let mut values = self.values.lock().unwrap();
            for key in [KEY_TOKEN, KEY_ROLE, KEY_USER_NAME] {
                values.remove(key);
            }
            self.persist(&values);
        }
        self.notify();
    }

    /// Registra um observador de mudança de perfil; as telas re-derivam
    /// a visibilidade quando a sessão muda.
    pub fn subscribe(&self, listener: impl Fn(Role) + Send + Sync + 'static) {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    fn notify(&self) {
        let role = self.role();
        for listener in self.listeners.lock().unwrap().iter() {
            listener(role);
        }
    }
}
