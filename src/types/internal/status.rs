//! Status and kind enums for items and reconciliation requests.
//!
//! Database columns store the lowercase string form; these enums exist so
//! the state machine in the item store can match exhaustively instead of
//! comparing raw strings.

/// Whether an item was lost by its poster or found by its poster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lost" => Some(ItemKind::Lost),
            "found" => Some(ItemKind::Found),
            _ => None,
        }
    }

    /// The request kind an item of this type accepts.
    pub fn request_kind(&self) -> RequestKind {
        match self {
            ItemKind::Found => RequestKind::Claim,
            ItemKind::Lost => RequestKind::Inform,
        }
    }
}

/// Item lifecycle: `Active` is still seeking, `Claimed` is reunited and
/// terminal for search purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    Active,
    Claimed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Claimed => "claimed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ItemStatus::Active),
            "claimed" => Some(ItemStatus::Claimed),
            _ => None,
        }
    }
}

/// Claim requests target found items; inform requests target lost items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Claim,
    Inform,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Claim => "claim",
            RequestKind::Inform => "inform",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "claim" => Some(RequestKind::Claim),
            "inform" => Some(RequestKind::Inform),
            _ => None,
        }
    }

    /// Warning discriminator returned when the requester already has a
    /// pending request on the item.
    pub fn duplicate_warning(&self) -> &'static str {
        match self {
            RequestKind::Claim => "duplicate_claim",
            RequestKind::Inform => "duplicate_inform",
        }
    }
}

/// Request lifecycle: created `Pending`, settled at most once into
/// `Approved` or `Rejected`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_round_trips_through_strings() {
        for kind in [ItemKind::Lost, ItemKind::Found] {
            assert_eq!(ItemKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ItemKind::parse("stolen"), None);
    }

    #[test]
    fn test_found_items_take_claims_and_lost_items_take_informs() {
        assert_eq!(ItemKind::Found.request_kind(), RequestKind::Claim);
        assert_eq!(ItemKind::Lost.request_kind(), RequestKind::Inform);
    }

    #[test]
    fn test_duplicate_warning_discriminators() {
        assert_eq!(RequestKind::Claim.duplicate_warning(), "duplicate_claim");
        assert_eq!(RequestKind::Inform.duplicate_warning(), "duplicate_inform");
    }

    #[test]
    fn test_request_status_round_trips_through_strings() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RequestStatus::parse("accepted"), None);
    }
}
