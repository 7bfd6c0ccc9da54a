use super::session::{Role, SessionStore};

/// Seções navegáveis do painel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    TrocarSenha,
    Estoque,
    Vendas,
    Vendedoras,
    Relatorios,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::TrocarSenha => "/trocar-senha",
            Route::Estoque => "/estoque",
            Route::Vendas => "/vendas",
            Route::Vendedoras => "/vendedoras",
            Route::Relatorios => "/relatorios",
        }
    }

    /// Resolve um caminho para a seção dona dele (prefixo, como a
    /// navegação original).
    pub fn from_path(path: &str) -> Option<Route> {
        const ALL: [Route; 6] = [
            Route::Login,
            Route::TrocarSenha,
            Route::Estoque,
            Route::Vendas,
            Route::Vendedoras,
            Route::Relatorios,
        ];

        ALL.into_iter()
            .find(|r| path == r.path() || path.starts_with(&format!("{}/", r.path())))
    }

    /// Rotas acessíveis sem sessão.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }
}

/// Seção inicial por perfil: vendedora cai direto em Vendas, os demais
/// nos Relatórios.
pub fn default_route(role: Role) -> Route {
    match role {
        Role::Seller => Route::Vendas,
        _ => Route::Relatorios,
    }
}

/// Itens de navegação visíveis para o perfil.
pub fn visible_nav(role: Role) -> Vec<Route> {
    match role {
        Role::Seller => vec![Route::Estoque, Route::Vendas],
        _ => vec![Route::Estoque, Route::Vendas, Route::Vendedoras, Route::Relatorios],
    }
}

/// Só admin/gerente podem buscar o diretório de vendedoras; vendedora e
/// perfil desconhecido nem chamam o endpoint.
pub fn can_list_sellers(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Gerente)
}

/// Guarda de navegação, re-executada a cada mudança de rota (não só na
/// montagem): devolve a rota de redirecionamento quando o acesso é
/// negado, `None` quando a navegação pode seguir.
pub fn check_access(route: Route, session: &SessionStore) -> Option<Route> {
    if !session.is_logged_in() {
        return if route.is_public() { None } else { Some(Route::Login) };
    }

    let role = session.role();
    if role == Role::Seller && matches!(route, Route::Relatorios | Route::Vendedoras) {
        return Some(default_route(role));
    }

    None
}

/// Destino após uma resposta 401: login, a menos que já se esteja lá
/// (evita loop de redirecionamento).
pub fn unauthorized_redirect(current: Route) -> Option<Route> {
    if current == Route::Login {
        None
    } else {
        Some(Route::Login)
    }
}
