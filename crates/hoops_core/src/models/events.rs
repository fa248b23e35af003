use serde::{Deserialize, Serialize};

use super::Side;

/// One entry in the match's append-only event log.
///
/// The log is the ordered audit trail of the whole match; narration and
/// presentation collaborators replay it rather than poking at engine state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    /// Monotonic sequence number across the whole match.
    pub seq: u32,
    /// Round counter, 1-100. Zero for pre-match events.
    pub round: u32,
    pub quarter: u8,
    /// Side in possession when the event was logged.
    pub possession: Side,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

/// Stable event-type tags consumed by narration collaborators. The serialized
/// names are a documented contract; do not rename them casually.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventType {
    #[serde(rename = "matchStart")]
    MatchStart,
    #[serde(rename = "score2pt")]
    Score2Pt,
    #[serde(rename = "score3pt")]
    Score3Pt,
    #[serde(rename = "miss2pt")]
    Miss2Pt,
    #[serde(rename = "miss3pt")]
    Miss3Pt,
    #[serde(rename = "steal")]
    Steal,
    #[serde(rename = "block")]
    Block,
    #[serde(rename = "reboundDefense")]
    ReboundDefense,
    #[serde(rename = "reboundOffense")]
    ReboundOffense,
    #[serde(rename = "turnover")]
    Turnover,
    #[serde(rename = "dribbleContest")]
    DribbleContest,
    #[serde(rename = "fastBreakStart")]
    FastBreakStart,
    #[serde(rename = "score2ptFastBreak")]
    Score2PtFastBreak,
    #[serde(rename = "score3ptFastBreak")]
    Score3PtFastBreak,
    #[serde(rename = "quarterEnd")]
    QuarterEnd,
    #[serde(rename = "closeGame")]
    CloseGame,
    #[serde(rename = "blowout")]
    Blowout,
    #[serde(rename = "matchEnd")]
    MatchEnd,
    #[serde(rename = "matchTie")]
    MatchTie,
}

/// Sparse structured payload attached to an event. Field names follow the
/// narration collaborator contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offense_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_total: Option<u32>,
}

impl MatchEvent {
    /// Is this one of the tags that only fire on a score change?
    pub fn is_score(&self) -> bool {
        matches!(
            self.event_type,
            EventType::Score2Pt
                | EventType::Score3Pt
                | EventType::Score2PtFastBreak
                | EventType::Score3PtFastBreak
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serializes_to_contract_tags() {
        let tags = [
            (EventType::MatchStart, "\"matchStart\""),
            (EventType::Score2Pt, "\"score2pt\""),
            (EventType::Score3PtFastBreak, "\"score3ptFastBreak\""),
            (EventType::ReboundDefense, "\"reboundDefense\""),
            (EventType::QuarterEnd, "\"quarterEnd\""),
            (EventType::MatchTie, "\"matchTie\""),
        ];
        for (tag, expected) in tags {
            assert_eq!(serde_json::to_string(&tag).unwrap(), expected);
        }
    }

    #[test]
    fn test_sparse_details_skip_absent_fields() {
        let details = EventDetails {
            player: Some("Ace".to_string()),
            points: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"player":"Ace","points":3}"#);
    }

    #[test]
    fn test_is_score_covers_fast_break_tags() {
        let event = MatchEvent {
            seq: 1,
            round: 3,
            quarter: 1,
            possession: Side::Away,
            event_type: EventType::Score2PtFastBreak,
            description: String::new(),
            details: None,
        };
        assert!(event.is_score());
    }
}
