//! Schedule conflict detection.
//!
//! Two sessions of the same team conflict when their half-open windows
//! overlap. Conflicts are advisory: the detector reports them and the
//! caller decides whether to block, warn or ignore.

use super::placement::Placement;
use crate::core::ids::SessionId;
use crate::session::entities::TrainingSession;
use std::collections::{BTreeSet, HashMap};

/// Sessions that can take part in a conflict: placed and not deleted.
fn placed(session: &TrainingSession) -> Option<Placement> {
    if session.is_deleted() {
        return None;
    }
    Placement::of(session)
}

/// Ids of the team's sessions that overlap the candidate.
///
/// The candidate's own id is skipped, so the stored copy of a session being
/// edited never conflicts with its new placement. Sessions of other teams,
/// deleted sessions and sessions without a complete placement are ignored.
/// Runs in O(n).
pub fn check_conflicts(
    candidate: &Placement,
    team_sessions: &[TrainingSession],
) -> BTreeSet<SessionId> {
    team_sessions
        .iter()
        .filter(|s| s.team_id == candidate.team_id)
        .filter(|s| candidate.session_id.as_ref() != Some(&s.id))
        .filter_map(|s| placed(s).map(|p| (s, p)))
        .filter(|(_, p)| candidate.overlaps(p))
        .map(|(s, _)| s.id.clone())
        .collect()
}

/// Symmetric conflict adjacency for every placed session.
///
/// Sorted sweep per team: after sorting by start, every session that
/// overlaps session `i` and starts no earlier than it sits in the contiguous
/// run right after `i`, so the inner scan stops at the first session that
/// starts at or after `i` ends. O(n log n + k) for k conflicting pairs.
pub fn conflict_map(sessions: &[TrainingSession]) -> HashMap<SessionId, BTreeSet<SessionId>> {
    let mut by_team: HashMap<_, Vec<Placement>> = HashMap::new();
    for placement in sessions.iter().filter_map(placed) {
        by_team
            .entry(placement.team_id.clone())
            .or_default()
            .push(placement);
    }

    let mut map: HashMap<SessionId, BTreeSet<SessionId>> = HashMap::new();

    for placements in by_team.values_mut() {
        placements.sort_by(|a, b| {
            a.start_at
                .cmp(&b.start_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });

        for (i, current) in placements.iter().enumerate() {
            let Some(current_id) = current.session_id.clone() else {
                continue;
            };
            map.entry(current_id.clone()).or_default();

            let end = current.end_at();
            for other in placements[i + 1..].iter().take_while(|p| p.start_at < end) {
                let Some(other_id) = other.session_id.clone() else {
                    continue;
                };
                if other_id == current_id {
                    continue;
                }
                map.entry(current_id.clone())
                    .or_default()
                    .insert(other_id.clone());
                map.entry(other_id).or_default().insert(current_id.clone());
            }
        }
    }

    map
}

/// Batch pass for a view: every placed, non-deleted session mapped to
/// whether it conflicts with anything.
pub fn detect_all(sessions: &[TrainingSession]) -> HashMap<SessionId, bool> {
    conflict_map(sessions)
        .into_iter()
        .map(|(id, others)| (id, !others.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::TeamId;
    use crate::session::entities::{SessionStatus, SessionType};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 12, h, m, 0).unwrap()
    }

    fn session(id: &str, team: &str, h: u32, m: u32, minutes: u32) -> TrainingSession {
        TrainingSession::new_draft(id, team, SessionType::Court)
            .with_start(at(h, m))
            .with_duration(minutes)
    }

    fn candidate_for(s: &TrainingSession) -> Placement {
        Placement::of(s).unwrap()
    }

    fn ids(names: &[&str]) -> BTreeSet<SessionId> {
        names.iter().map(|n| SessionId::from(*n)).collect()
    }

    #[test]
    fn test_nine_and_ten_with_ninety_minutes_conflict() {
        let a = session("a", "t", 9, 0, 90);
        let b = session("b", "t", 10, 0, 90);
        let all = vec![a.clone(), b.clone()];
        assert_eq!(check_conflicts(&candidate_for(&a), &all), ids(&["b"]));
        assert_eq!(check_conflicts(&candidate_for(&b), &all), ids(&["a"]));
    }

    #[test]
    fn test_nine_ninety_and_eleven_thirty_do_not_conflict() {
        let a = session("a", "t", 9, 0, 90);
        let b = session("b", "t", 11, 0, 30);
        let all = vec![a.clone(), b.clone()];
        assert!(check_conflicts(&candidate_for(&a), &all).is_empty());
        assert!(check_conflicts(&candidate_for(&b), &all).is_empty());
    }

    #[test]
    fn test_check_conflicts_is_symmetric() {
        let sessions = vec![
            session("a", "t", 8, 0, 60),
            session("b", "t", 8, 30, 90),
            session("c", "t", 9, 45, 30),
            session("d", "t", 11, 0, 60),
            session("e", "t", 11, 59, 5),
        ];
        for x in &sessions {
            for y in &sessions {
                if x.id == y.id {
                    continue;
                }
                let x_hits = check_conflicts(&candidate_for(x), &sessions).contains(&y.id);
                let y_hits = check_conflicts(&candidate_for(y), &sessions).contains(&x.id);
                assert_eq!(x_hits, y_hits, "asymmetric for {} / {}", x.id, y.id);
            }
        }
    }

    #[test]
    fn test_ignores_other_teams_and_deleted() {
        let mine = session("a", "t1", 9, 0, 60);
        let other_team = session("b", "t2", 9, 0, 60);
        let deleted = session("c", "t1", 9, 0, 60).with_status(SessionStatus::Deleted);
        let unplaced = TrainingSession::new_draft("d", "t1", SessionType::Meeting);
        let all = vec![mine.clone(), other_team, deleted, unplaced];
        assert!(check_conflicts(&candidate_for(&mine), &all).is_empty());
    }

    #[test]
    fn test_new_candidate_without_id() {
        let existing = vec![session("a", "t", 9, 0, 60)];
        let candidate = Placement::new(None, TeamId::from("t"), at(9, 30), 30).unwrap();
        assert_eq!(check_conflicts(&candidate, &existing), ids(&["a"]));
    }

    #[test]
    fn test_moved_session_excludes_its_stored_copy() {
        let stored = session("a", "t", 9, 0, 60);
        let mut moved = candidate_for(&stored);
        moved.start_at = at(9, 30);
        assert!(check_conflicts(&moved, &[stored]).is_empty());
    }

    #[test]
    fn test_conflict_map_matches_pairwise_check() {
        let sessions = vec![
            session("a", "t", 8, 0, 240),
            session("b", "t", 8, 30, 30),
            session("c", "t", 10, 0, 30),
            session("d", "t", 13, 0, 60),
            session("e", "t", 13, 0, 60),
            session("f", "u", 8, 0, 240),
        ];
        let map = conflict_map(&sessions);
        for s in &sessions {
            assert_eq!(
                map.get(&s.id).cloned().unwrap_or_default(),
                check_conflicts(&candidate_for(s), &sessions),
                "mismatch for {}",
                s.id
            );
        }
        // "a" spans b and c even though b ends before c starts.
        assert_eq!(map[&SessionId::from("a")], ids(&["b", "c"]));
        assert_eq!(map[&SessionId::from("c")], ids(&["a"]));
    }

    #[test]
    fn test_detect_all_flags() {
        let sessions = vec![
            session("a", "t", 9, 0, 90),
            session("b", "t", 10, 0, 90),
            session("c", "t", 14, 0, 60),
            TrainingSession::new_draft("d", "t", SessionType::Video),
        ];
        let flags = detect_all(&sessions);
        assert_eq!(flags.len(), 3);
        assert!(flags[&SessionId::from("a")]);
        assert!(flags[&SessionId::from("b")]);
        assert!(!flags[&SessionId::from("c")]);
        assert!(!flags.contains_key(&SessionId::from("d")));
    }

    #[test]
    fn test_single_session_never_flagged() {
        let flags = detect_all(&[session("solo", "t", 9, 0, 60)]);
        assert!(!flags[&SessionId::from("solo")]);
    }
}
