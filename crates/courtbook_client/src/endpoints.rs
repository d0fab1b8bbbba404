//! Backend endpoint paths, relative to the configured base URL.
//!
//! Every path keeps the backend's trailing-slash convention.

// Auth
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const REGISTER: &str = "/auth/register/";
pub const REFRESH_TOKEN: &str = "/auth/refresh/";
pub const ME: &str = "/auth/me/";
pub const CHANGE_PASSWORD: &str = "/auth/change_password/";
pub const DELETE_ACCOUNT: &str = "/auth/delete_account/";

// Sites
pub const SITES: &str = "/sites/";

// Courts
pub const COURTS: &str = "/courts/courts/";
pub const EQUIPMENTS: &str = "/courts/equipments/";

// Reservations
pub const RESERVATIONS: &str = "/reservations/";
pub const MY_RESERVATIONS: &str = "/reservations/my_reservations/";
pub const CHECK_AVAILABILITY: &str = "/reservations/check_availability/";
pub const SITE_STATS: &str = "/reservations/site_stats/";

// Payments
pub const PAYMENTS: &str = "/payments/payments/";
pub const CREATE_PAYMENT_INTENT: &str = "/payments/payments/create_payment_intent/";
pub const CONFIRM_PAYMENT: &str = "/payments/payments/confirm_payment/";
pub const INVOICES: &str = "/payments/invoices/";

/// `{collection}{id}/`
pub fn detail(collection: &str, id: u64) -> String {
    format!("{}{}/", collection, id)
}

/// `{collection}{id}/{action}/`
pub fn detail_action(collection: &str, id: u64, action: &str) -> String {
    format!("{}{}/{}/", collection, id, action)
}
