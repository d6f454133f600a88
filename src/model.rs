// Wire types for the movements API. Request types only serialize the
// fields that were actually given; response types tolerate missing fields
// since the server owns their exact shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of a movement as understood by the API.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Income,
    Expense,
    Investment,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::Income => "income",
            MovementKind::Expense => "expense",
            MovementKind::Investment => "investment",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Third party that paid on the account's behalf. Kept as one value so the
/// `create_debt` flag can only travel together with `paid_by_external`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExternalPayer {
    #[serde(rename = "paid_by_external")]
    pub name: String,
    /// Ask the server to also open a debt record for this payment.
    pub create_debt: bool,
}

/// Payload for creating a movement. Build with `NewMovement::new` and the
/// `with_*` methods; every optional field is sent only when set.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub kind: MovementKind,
    pub amount: f64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subscription: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    #[serde(flatten)]
    pub paid_by: Option<ExternalPayer>,
}

impl NewMovement {
    pub fn new(
        kind: MovementKind,
        amount: f64,
        date: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        NewMovement {
            kind,
            amount,
            date: date.into(),
            account_id: account_id.into(),
            description: None,
            category_id: None,
            organization_id: None,
            provider: None,
            payment_method: None,
            tax_rate: None,
            tax_amount: None,
            is_subscription: None,
            subscription_end_date: None,
            auto_renew: None,
            paid_by: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    pub fn with_tax_amount(mut self, tax_amount: f64) -> Self {
        self.tax_amount = Some(tax_amount);
        self
    }

    /// Mark as a subscription, optionally ending on `end_date`.
    pub fn with_subscription(mut self, end_date: Option<String>, auto_renew: bool) -> Self {
        self.is_subscription = Some(true);
        self.subscription_end_date = end_date;
        self.auto_renew = Some(auto_renew);
        self
    }

    pub fn paid_by_external(mut self, name: impl Into<String>, create_debt: bool) -> Self {
        self.paid_by = Some(ExternalPayer {
            name: name.into(),
            create_debt,
        });
        self
    }
}

/// Filters and pagination window for listing movements.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MovementQuery {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MovementKind>,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    #[serde(rename = "to", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl MovementQuery {
    pub fn new(limit: u32, offset: u32) -> Self {
        MovementQuery {
            limit,
            offset,
            kind: None,
            from_date: None,
            to_date: None,
            search: None,
            account_id: None,
            category_id: None,
            organization_id: None,
        }
    }

    pub fn kind(mut self, kind: MovementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }
}

impl Default for MovementQuery {
    fn default() -> Self {
        MovementQuery::new(50, 0)
    }
}

/// A movement as returned by the API. Fields the client does not model
/// (embedded `category`, `account`, timestamps...) are kept in `extra`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Movement {
    #[serde(default)]
    pub id: Option<String>,
    pub kind: MovementKind,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub paid_by_external: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

/// One page of `GET /api/v1/movements`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MovementPage {
    /// Size of the full matching set, ignoring pagination.
    pub total: u64,
    /// Number of records in `data`.
    pub count: u64,
    pub data: Vec<Movement>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Response of `POST /api/v1/movements`, single or bulk.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CreateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub debts_created: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Movement>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateResponse {
    /// Id of the first created record, if the server echoed one back.
    pub fn first_id(&self) -> Option<&str> {
        self.data.first().and_then(|m| m.id.as_deref())
    }
}

/// Body of `GET /api/v1`. Every field is optional on our side.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HealthStatus {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }

    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }
}
