//! Service implementations for Mercado Pago resources.

pub mod payments;
pub mod preferences;

pub use payments::{PaymentsService, PAYMENTS_PATH, PAYMENTS_SEARCH_PATH};
pub use preferences::{PreferencesService, PREFERENCES_PATH};
