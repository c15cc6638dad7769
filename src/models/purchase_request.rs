use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Field office a PR is raised for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Raqqa,
    Hasakeh,
    DeirEzzor,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Raqqa, Location::Hasakeh, Location::DeirEzzor];

    /// Wire value, also the lookup key of the code table
    pub fn key(&self) -> &'static str {
        match self {
            Location::Raqqa => "Raqqa",
            Location::Hasakeh => "Hasakeh",
            Location::DeirEzzor => "DeirEzzor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::Raqqa => "Raqqa",
            Location::Hasakeh => "Hasakeh",
            Location::DeirEzzor => "Deir ez-Zor",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Location::Raqqa => "RQ",
            Location::Hasakeh => "HK",
            Location::DeirEzzor => "DZ",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.key() == key.trim())
    }
}

/// Programme department a PR is charged to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Health,
    #[serde(rename = "WASH")]
    Wash,
    Education,
}

impl Department {
    pub const ALL: [Department; 3] = [Department::Health, Department::Wash, Department::Education];

    pub fn key(&self) -> &'static str {
        match self {
            Department::Health => "Health",
            Department::Wash => "WASH",
            Department::Education => "Education",
        }
    }

    pub fn label(&self) -> &'static str {
        self.key()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Department::Health => "HC",
            Department::Wash => "WSH",
            Department::Education => "EDU",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dep| dep.key() == key.trim())
    }
}

/// PR record as returned by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub uprn: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub estimated_amount: f64,
    #[serde(default)]
    pub requester: String,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// Backends disagree on date shapes ("2025-01-15" vs full ISO timestamps).
// Unparseable values become None instead of failing the whole listing.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let day = s.get(..10).unwrap_or(s.as_str());
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }))
}

impl PurchaseRequest {
    /// Date shown in the table: server creation date, else the request date
    pub fn display_date(&self) -> String {
        self.created_at
            .map(|ts| ts.date_naive())
            .or(self.date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn display_amount(&self) -> String {
        if self.estimated_amount.fract() == 0.0 {
            format!("{:.0} USD", self.estimated_amount)
        } else {
            format!("{:.2} USD", self.estimated_amount)
        }
    }
}

/// Local stand-in for a created record when the server sends none back
impl From<&NewPurchaseRequest> for PurchaseRequest {
    fn from(pr: &NewPurchaseRequest) -> Self {
        Self {
            id: None,
            code: pr.code.clone(),
            uprn: pr.uprn.clone(),
            location: pr.location.key().to_string(),
            department: pr.department.key().to_string(),
            estimated_amount: pr.estimated_amount,
            requester: pr.requester.clone(),
            date: Some(pr.date),
            created_at: None,
        }
    }
}

/// Payload for PR creation. Only built from a validated form draft.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchaseRequest {
    pub uprn: String,
    pub location: Location,
    pub department: Department,
    pub estimated_amount: f64,
    pub requester: String,
    pub date: NaiveDate,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_and_department_keys_round_trip() {
        for loc in Location::ALL {
            assert_eq!(Location::from_key(loc.key()), Some(loc));
        }
        for dep in Department::ALL {
            assert_eq!(Department::from_key(dep.key()), Some(dep));
        }
        assert_eq!(Location::from_key("Aleppo"), None);
        assert_eq!(Department::from_key("wash"), None);
    }

    #[test]
    fn new_request_serializes_camel_case_with_wire_keys() {
        let pr = NewPurchaseRequest {
            uprn: "U-1".to_string(),
            location: Location::DeirEzzor,
            department: Department::Wash,
            estimated_amount: 250.0,
            requester: "Ana".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            code: "SY-DZ-WSH-1234".to_string(),
        };
        let json = serde_json::to_value(&pr).unwrap();
        assert_eq!(json["location"], "DeirEzzor");
        assert_eq!(json["department"], "WASH");
        assert_eq!(json["estimatedAmount"], 250.0);
        assert_eq!(json["date"], "2025-03-01");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn record_deserializes_server_fields() {
        let json = r#"{
            "_id": "65f0",
            "code": "SY-RQ-HC-4821",
            "uprn": "U123",
            "location": "Raqqa",
            "department": "Health",
            "estimatedAmount": 999,
            "requester": "Ana",
            "createdAt": "2025-01-15T09:30:00.000Z"
        }"#;
        let pr: PurchaseRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.id.as_deref(), Some("65f0"));
        assert_eq!(pr.display_date(), "2025-01-15");
        assert_eq!(pr.display_amount(), "999 USD");
    }

    #[test]
    fn record_tolerates_odd_dates() {
        let json = r#"{"code":"SY-HK-EDU-1000","date":"2025-02-03T00:00:00.000Z","createdAt":"yesterday"}"#;
        let pr: PurchaseRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.date, NaiveDate::from_ymd_opt(2025, 2, 3));
        assert_eq!(pr.created_at, None);
        assert_eq!(pr.display_date(), "2025-02-03");
    }

    #[test]
    fn display_date_falls_back_to_request_date() {
        let pr = PurchaseRequest {
            id: None,
            code: String::new(),
            uprn: String::new(),
            location: String::new(),
            department: String::new(),
            estimated_amount: 12.5,
            requester: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 12, 31),
            created_at: None,
        };
        assert_eq!(pr.display_date(), "2024-12-31");
        assert_eq!(pr.display_amount(), "12.50 USD");
    }
}
