//! Data types exchanged with the library REST API.

use serde::{Deserialize, Serialize};

/// A catalog entry as returned by `/api/search`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Book {
    pub barcode: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub call_number: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub misplaced: bool,
    #[serde(default)]
    pub wrong_location: bool,
}

/// Shelf placement derived from the availability flags.
///
/// The flags are not mutually exclusive on the wire; precedence follows
/// the backend's convention: available > wrong_location > misplaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    OnShelf,
    WrongLocation,
    OutOfOrder,
    Missing,
}

impl Book {
    pub fn placement(&self) -> Placement {
        if self.available {
            Placement::OnShelf
        } else if self.wrong_location {
            Placement::WrongLocation
        } else if self.misplaced {
            Placement::OutOfOrder
        } else {
            Placement::Missing
        }
    }
}

impl Placement {
    pub fn label(self) -> &'static str {
        match self {
            Placement::OnShelf => "On shelf",
            Placement::WrongLocation => "Wrong location",
            Placement::OutOfOrder => "Out of order",
            Placement::Missing => "Missing",
        }
    }
}

/// Robot state reported by `/api/robot_status`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotStatus {
    #[default]
    Normal,
    Scanning,
    Complete,
}

impl RobotStatus {
    pub fn label(self) -> &'static str {
        match self {
            RobotStatus::Normal => "Idle",
            RobotStatus::Scanning => "Scanning shelves",
            RobotStatus::Complete => "Scan complete",
        }
    }
}

/// Assistant reply from `/api/chat`.
///
/// `sources` and `usage` ride along for completeness but the client only
/// renders `content`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatReply {
    pub content: String,
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
}

/// Acknowledgement for a book-guidance request (`/api/book-click`).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GuideAck {
    #[serde(default, rename = "requestId")]
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_precedence() {
        let mut book = Book {
            available: true,
            wrong_location: true,
            misplaced: true,
            ..Book::default()
        };
        assert_eq!(book.placement(), Placement::OnShelf);

        book.available = false;
        assert_eq!(book.placement(), Placement::WrongLocation);

        book.wrong_location = false;
        assert_eq!(book.placement(), Placement::OutOfOrder);

        book.misplaced = false;
        assert_eq!(book.placement(), Placement::Missing);
    }

    #[test]
    fn test_robot_status_roundtrip() {
        let s: RobotStatus = serde_json::from_str("\"scanning\"").unwrap();
        assert_eq!(s, RobotStatus::Scanning);
        assert_eq!(serde_json::to_string(&RobotStatus::Normal).unwrap(), "\"normal\"");
    }

    #[test]
    fn test_book_deserialize_partial() {
        // The search endpoint omits optional fields for some records.
        let book: Book = serde_json::from_str(
            r#"{"barcode":"B123","title":"Walden","author":"Thoreau"}"#,
        )
        .unwrap();
        assert_eq!(book.barcode, "B123");
        assert!(book.call_number.is_none());
        assert_eq!(book.placement(), Placement::Missing);
    }
}
