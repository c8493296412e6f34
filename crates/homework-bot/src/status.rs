//! Response validation and verdict messages.
//!
//! The review service answers with
//! `{"homeworks": [{"homework_name": ..., "status": ...}, ...], "current_date": <unix seconds>}`,
//! newest homework first.

use serde_json::Value;

use crate::error::{BotError, BotResult};

/// Review outcome of a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Accepted by the reviewer.
    Approved,
    /// Picked up for review.
    Reviewing,
    /// Returned with remarks.
    Rejected,
}

impl Verdict {
    /// Map a raw status string from the API.
    #[must_use]
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict sentence sent to the chat.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// One homework record as returned by the API.
///
/// Fields stay optional here; [`describe`] enforces that they are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Homework {
    /// `homework_name`.
    pub name: Option<String>,
    /// Raw `status` string.
    pub status: Option<String>,
}

impl Homework {
    fn from_value(value: &Value) -> BotResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| BotError::Field("latest homework is not an object".to_string()))?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(ToOwned::to_owned);
        Ok(Self {
            name: text("homework_name"),
            status: text("status"),
        })
    }
}

/// A validated poll response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    /// The newest homework updated since the requested `from_date`.
    pub latest: Option<Homework>,
    /// How many homeworks the response listed.
    pub count: usize,
    /// Server time to use as the next `from_date`.
    pub current_date: i64,
}

/// Check the response shape and extract the homework list.
///
/// # Errors
///
/// Returns [`BotError::Shape`] if `response` is not an object, lacks
/// `homeworks` or `current_date`, `homeworks` is not an array, or
/// `current_date` is not an integer. Only the first entry is read; it is a
/// [`BotError::Field`] if that entry is not an object. Later entries are
/// never inspected.
pub fn validate_response(response: &Value) -> BotResult<PollResult> {
    let obj = response
        .as_object()
        .ok_or_else(|| BotError::Shape("response is not a JSON object".to_string()))?;

    let homeworks = obj
        .get("homeworks")
        .ok_or_else(|| BotError::Shape("missing key 'homeworks'".to_string()))?;
    let current_date = obj
        .get("current_date")
        .ok_or_else(|| BotError::Shape("missing key 'current_date'".to_string()))?;

    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| BotError::Shape("'homeworks' is not a list".to_string()))?;

    let current_date = current_date
        .as_i64()
        .ok_or_else(|| BotError::Shape("'current_date' is not an integer".to_string()))?;

    let latest = homeworks.first().map(Homework::from_value).transpose()?;

    Ok(PollResult {
        latest,
        count: homeworks.len(),
        current_date,
    })
}

/// Build the chat message for a homework's current status.
///
/// # Errors
///
/// Returns [`BotError::Field`] if the name or status is missing or empty, and
/// [`BotError::UnknownVerdict`] for a status outside the known set.
pub fn describe(homework: &Homework) -> BotResult<String> {
    let name = non_empty(homework.name.as_deref())
        .ok_or_else(|| BotError::Field("missing 'homework_name'".to_string()))?;
    let status = non_empty(homework.status.as_deref())
        .ok_or_else(|| BotError::Field("missing 'status'".to_string()))?;
    let verdict =
        Verdict::parse(status).ok_or_else(|| BotError::UnknownVerdict(status.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        verdict.text()
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
