//! Checkout preference types.

use serde::{Deserialize, Serialize};

use super::common::{Address, Identification, Item, Phone};

/// Checkout preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<PreferencePayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<PaymentMethods>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipments: Option<Shipments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_urls: Option<BackUrls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox_init_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_return: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Preference {
    /// Creates an empty preference carrying an external reference.
    pub fn with_reference(external_reference: impl Into<String>) -> Self {
        Self {
            external_reference: Some(external_reference.into()),
            ..Default::default()
        }
    }

    /// Adds an item.
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Sets the payer.
    pub fn payer(mut self, payer: PreferencePayer) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Checkout URL for the buyer: the sandbox init point in sandbox mode,
    /// the production one otherwise.
    pub fn checkout_url(&self, sandbox: bool) -> Option<&str> {
        if sandbox {
            self.sandbox_init_point.as_deref()
        } else {
            self.init_point.as_deref()
        }
    }
}

/// Buyer information on a preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencePayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<Identification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PayerAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
}

/// Buyer address on a preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayerAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
}

/// Payment method restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethods {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_payment_methods: Vec<PaymentMethodRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_payment_types: Vec<PaymentMethodRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_installments: Option<i32>,
}

/// Reference to a payment method or payment type by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Shipping configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_pickup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_shipping_method: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free_methods: Vec<FreeMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_shipping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_address: Option<Address>,
}

/// Shipping method offered for free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Return URLs after checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}
