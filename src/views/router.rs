pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Main,
    /// Unknown path, or a page the current session may not see
    Redirect(&'static str),
}

/// Resolve a path for the current session
pub fn route(is_authenticated: bool, path: &str) -> Route {
    match (path, is_authenticated) {
        (LOGIN_PATH, false) => Route::Login,
        (LOGIN_PATH, true) => Route::Redirect(HOME_PATH),
        (HOME_PATH, true) => Route::Main,
        (HOME_PATH, false) => Route::Redirect(LOGIN_PATH),
        _ => Route::Redirect(HOME_PATH),
    }
}
