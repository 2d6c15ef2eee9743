//! Default configuration values

pub struct RoutingDefaults;

impl RoutingDefaults {
    /// Applications are mounted at the web root
    pub const BASE_URL: &'static str = "";
    /// Scheme of absolute URLs follows the request unless forced
    pub const FORCE_HTTPS: Option<bool> = None;
}
