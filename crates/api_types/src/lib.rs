use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// List envelope returned by every `GET /<resource>` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> Items<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

pub mod notification {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ChangeType {
        Create,
        Update,
        Delete,
    }

    /// Message pushed over the `/<resource>/updates` websocket.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Notification<T> {
        #[serde(rename = "type")]
        pub change: ChangeType,
        pub id: i32,
        pub item: Option<T>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SignUp {
        pub username: Option<String>,
        pub password: Option<String>,
        pub name: Option<String>,
        pub email: Option<String>,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub username: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub token: String,
    }

    /// A user as seen by clients. The password hash never leaves the server.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Account {
        pub id: i32,
        pub uuid: Uuid,
        pub username: String,
        pub name: Option<String>,
        pub email: Option<String>,
        pub photo_url: Option<String>,
        pub date_created: i64,
        pub date_updated: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountUpdate {
        pub uuid: Uuid,
        pub name: Option<String>,
        pub email: Option<String>,
        pub photo_url: Option<String>,
        pub password: Option<String>,
    }

    /// Why a request was refused with 401.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum InvalidUserReason {
        General,
        Expired,
        InvalidJwt,
        NoUserFound,
        WrongUser,
        InvalidUserInfo,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvalidUser {
        pub path: String,
        pub status: u16,
        pub reason: InvalidUserReason,
    }
}

pub mod tax {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum MaritalStatus {
        Single,
        Married,
    }

    impl MaritalStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Single => "Single",
                Self::Married => "Married",
            }
        }
    }

    impl TryFrom<&str> for MaritalStatus {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "Single" => Ok(Self::Single),
                "Married" => Ok(Self::Married),
                other => Err(format!("unknown marital status: {other}")),
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum PayPeriod {
        Weekly,
        Biweekly,
        Semimonthly,
        Monthly,
        Quarterly,
        Semiannual,
        Annual,
        Daily,
    }

    impl PayPeriod {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Weekly => "Weekly",
                Self::Biweekly => "Biweekly",
                Self::Semimonthly => "Semimonthly",
                Self::Monthly => "Monthly",
                Self::Quarterly => "Quarterly",
                Self::Semiannual => "Semiannual",
                Self::Annual => "Annual",
                Self::Daily => "Daily",
            }
        }
    }

    impl TryFrom<&str> for PayPeriod {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "Weekly" => Ok(Self::Weekly),
                "Biweekly" => Ok(Self::Biweekly),
                "Semimonthly" => Ok(Self::Semimonthly),
                "Monthly" => Ok(Self::Monthly),
                "Quarterly" => Ok(Self::Quarterly),
                "Semiannual" => Ok(Self::Semiannual),
                "Annual" => Ok(Self::Annual),
                "Daily" => Ok(Self::Daily),
                other => Err(format!("unknown pay period: {other}")),
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum WithholdingType {
        General,
        NonResidentAlien,
    }

    impl WithholdingType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::General => "General",
                Self::NonResidentAlien => "NonResidentAlien",
            }
        }
    }

    impl TryFrom<&str> for WithholdingType {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "General" => Ok(Self::General),
                "NonResidentAlien" => Ok(Self::NonResidentAlien),
                other => Err(format!("unknown withholding type: {other}")),
            }
        }
    }

    /// One row of the federal income tax withholding table.
    ///
    /// The bracket covers wages in `[over, not_over)`; a missing `not_over`
    /// means the bracket has no upper bound.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FederalIncomeTax {
        pub id: Option<i32>,
        pub year: i32,
        pub marital_status: MaritalStatus,
        pub pay_period: PayPeriod,
        pub over: f64,
        pub not_over: Option<f64>,
        pub plus: f64,
        pub percent: f64,
        pub non_taxable: f64,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MedicareLimit {
        pub marital_status: MaritalStatus,
        pub amount: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Medicare {
        pub id: Option<i32>,
        pub year: i32,
        pub percent: f64,
        pub additional_percent: f64,
        #[serde(default)]
        pub limits: Vec<MedicareLimit>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SocialSecurity {
        pub id: Option<i32>,
        pub year: i32,
        pub percent: f64,
        pub limit: i64,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TaxWithholding {
        pub id: Option<i32>,
        pub year: i32,
        pub pay_period: PayPeriod,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: WithholdingType,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }
}

pub mod bills {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Category {
        pub id: Option<i32>,
        /// Owner uuid. Always overwritten with the caller's uuid.
        #[serde(default)]
        pub owner: String,
        pub name: String,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Bill {
        pub id: Option<i32>,
        #[serde(default)]
        pub owner: String,
        pub name: String,
        /// Decimal amount, kept as the client sent it.
        pub amount: String,
        #[serde(default)]
        pub varying_amount: bool,
        pub payoff_amount: Option<String>,
        #[serde(default)]
        pub category_ids: Vec<i32>,
        pub color: Option<String>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Income {
        pub id: Option<i32>,
        #[serde(default)]
        pub owner: String,
        pub name: String,
        pub amount: String,
        #[serde(default)]
        pub varying_amount: bool,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Frequency {
        Never,
        Daily,
        Weekly,
        Biweekly,
        Monthly,
        Quarterly,
        Yearly,
    }

    impl Frequency {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Never => "Never",
                Self::Daily => "Daily",
                Self::Weekly => "Weekly",
                Self::Biweekly => "Biweekly",
                Self::Monthly => "Monthly",
                Self::Quarterly => "Quarterly",
                Self::Yearly => "Yearly",
            }
        }
    }

    impl TryFrom<&str> for Frequency {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            match value {
                "Never" => Ok(Self::Never),
                "Daily" => Ok(Self::Daily),
                "Weekly" => Ok(Self::Weekly),
                "Biweekly" => Ok(Self::Biweekly),
                "Monthly" => Ok(Self::Monthly),
                "Quarterly" => Ok(Self::Quarterly),
                "Yearly" => Ok(Self::Yearly),
                other => Err(format!("unknown frequency: {other}")),
            }
        }
    }

    /// A single due instance of a bill.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Occurrence {
        pub id: Option<i32>,
        #[serde(default)]
        pub owner: String,
        pub bill_id: i32,
        pub amount: String,
        pub amount_left: String,
        /// Unix milliseconds.
        pub due_date: i64,
        pub every: Frequency,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    /// An expected payment from an income source.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeOccurrence {
        pub id: Option<i32>,
        #[serde(default)]
        pub owner: String,
        pub income_id: i32,
        pub amount: String,
        /// Unix milliseconds.
        pub due_date: i64,
        pub every: Frequency,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }
}

pub mod botw {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Image {
        pub id: Option<i32>,
        pub name: String,
        pub src: String,
        pub width: i32,
        pub height: i32,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Effect {
        pub id: Option<i32>,
        pub name: String,
        pub description: String,
        pub timeout: Option<String>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Critter {
        pub id: Option<i32>,
        pub name: String,
        pub image: Option<String>,
        pub effect: Option<String>,
        pub hearts: Option<f64>,
        pub duration: Option<String>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Ingredient {
        pub id: Option<i32>,
        pub name: String,
        pub image: Option<String>,
        pub hearts: Option<f64>,
        pub effect: Option<String>,
        pub duration: Option<String>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Elixir {
        pub id: Option<i32>,
        pub name: String,
        pub image: Option<String>,
        pub effect: String,
        pub description: String,
        #[serde(default)]
        pub ingredients: Vec<String>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonsterPart {
        pub id: Option<i32>,
        pub name: String,
        pub duration: String,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    /// Shape shared by cooking-pot, roasted and frozen foods.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Food {
        pub id: Option<i32>,
        pub name: String,
        pub image: Option<String>,
        pub hearts: Option<f64>,
        pub effect: Option<String>,
        pub description: String,
        #[serde(default)]
        pub ingredients: Vec<String>,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OtherFood {
        pub id: Option<i32>,
        pub name: String,
        pub image: Option<String>,
        #[serde(default)]
        pub images: Vec<String>,
        pub description: String,
        #[serde(default)]
        pub ingredients: Vec<String>,
        pub method: String,
        #[serde(default)]
        pub date_created: i64,
        #[serde(default)]
        pub date_updated: i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_uses_camel_case_and_optional_dates() {
        let json = r#"{
            "id": null,
            "year": 2020,
            "maritalStatus": "Single",
            "payPeriod": "Weekly",
            "over": 1.0,
            "notOver": 5.0,
            "plus": 0.0,
            "percent": 10.0,
            "nonTaxable": 0.0
        }"#;
        let bracket: tax::FederalIncomeTax = serde_json::from_str(json).unwrap();
        assert_eq!(bracket.pay_period, tax::PayPeriod::Weekly);
        assert_eq!(bracket.not_over, Some(5.0));
        assert_eq!(bracket.date_created, 0);
    }

    #[test]
    fn notification_serializes_change_as_type() {
        let n = notification::Notification::<i32> {
            change: notification::ChangeType::Delete,
            id: 4,
            item: None,
        };
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "Delete");
        assert_eq!(value["id"], 4);
    }

    #[test]
    fn withholding_kind_is_named_type() {
        let json = r#"{"id":1,"year":2021,"payPeriod":"Monthly","amount":358.3,"type":"General"}"#;
        let w: tax::TaxWithholding = serde_json::from_str(json).unwrap();
        assert_eq!(w.kind, tax::WithholdingType::General);
    }

    #[test]
    fn enum_strings_round_trip() {
        for period in [tax::PayPeriod::Weekly, tax::PayPeriod::Daily] {
            assert_eq!(tax::PayPeriod::try_from(period.as_str()), Ok(period));
        }
        assert!(bills::Frequency::try_from("Fortnightly").is_err());
    }
}
