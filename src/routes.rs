//! Endpoint configuration
//!
//! Backend REST endpoints and frontend page paths.

/// Default clinic backend
pub const DEFAULT_BACKEND_URL: &str = "https://project-s-backend-cyan.vercel.app";

/// API root relative to the backend URL
const API_ROOT: &str = "/api/v1";

/// Backend endpoints derived from one base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRoutes {
    root: String,
}

impl BackendRoutes {
    pub fn new(base_url: &str) -> Self {
        Self {
            root: format!("{}{}", base_url.trim_end_matches('/'), API_ROOT),
        }
    }

    /// `<base>/api/v1`
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.root)
    }

    pub fn logout(&self) -> String {
        format!("{}/auth/logout", self.root)
    }

    pub fn register(&self) -> String {
        format!("{}/auth/register", self.root)
    }

    pub fn update_user(&self) -> String {
        format!("{}/auth/updateUser", self.root)
    }

    pub fn user_info(&self) -> String {
        format!("{}/auth/me", self.root)
    }

    pub fn dentists(&self) -> String {
        format!("{}/dentists", self.root)
    }

    pub fn register_dentist(&self) -> String {
        format!("{}/registerDent", self.root)
    }

    pub fn bookings(&self) -> String {
        format!("{}/bookings", self.root)
    }

    /// `/bookings/{id}`, with the id percent-encoded
    pub fn booking(&self, id: &str) -> String {
        format!("{}/bookings/{}", self.root, urlencoding::encode(id))
    }

    pub fn unavailable_bookings(&self) -> String {
        format!("{}/bookings/unavailable", self.root)
    }

    pub fn dentist_schedules(&self) -> String {
        format!("{}/bookings/schedules", self.root)
    }

    /// `/dentists/{id}/unavailable`
    pub fn unavailable_for_dentist(&self, dentist_id: &str) -> String {
        format!(
            "{}/dentists/{}/unavailable",
            self.root,
            urlencoding::encode(dentist_id)
        )
    }
}

impl Default for BackendRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

/// Pages of the booking frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendRoute {
    AdminManagement,
    DentistList,
    Login,
    Profile,
    Booking,
    Dentist,
}

impl FrontendRoute {
    pub fn path(&self) -> &'static str {
        match self {
            FrontendRoute::AdminManagement => "/admin/management",
            FrontendRoute::DentistList => "/list",
            FrontendRoute::Login => "/login",
            FrontendRoute::Profile => "/profile",
            FrontendRoute::Booking => "/booking",
            FrontendRoute::Dentist => "/dentist",
        }
    }
}
