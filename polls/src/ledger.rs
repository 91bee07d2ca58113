//! Poll vote recording and owner edits.

use campustalk_store::PollRecord;
use campustalk_types::{BoardError, Fingerprint, OptionId, Timestamp};

/// Record one vote on a poll.
///
/// Fails without mutating anything when the poll has expired, the option
/// does not exist, or the fingerprint has already voted. On success the
/// option counter and the voters set change together, keeping
/// `sum(option.votes) == |voters|`.
pub fn cast_vote(
    poll: &mut PollRecord,
    voter: Fingerprint,
    option: OptionId,
    now: Timestamp,
) -> Result<(), BoardError> {
    if poll.expires_at.is_past(now) {
        return Err(BoardError::Expired);
    }
    if poll.voters.contains(&voter) {
        return Err(BoardError::AlreadyVoted);
    }
    let entry = poll
        .options
        .get_mut(option.index())
        .ok_or_else(|| BoardError::InvalidOption(option.index() as u32))?;
    entry.votes += 1;
    poll.voters.insert(voter);
    Ok(())
}

/// Owner-only text edit of question and/or options.
///
/// New option texts map onto existing options by position; surplus texts
/// are ignored rather than growing the option list. Vote counters and the
/// voters set are never touched — an edit cannot reset or redistribute
/// votes. Positional mapping is lossy if the caller reorders options; that
/// is a product limitation, not something to silently repair here.
pub fn edit_poll(
    poll: &mut PollRecord,
    editor: Fingerprint,
    question: Option<String>,
    option_texts: Option<Vec<String>>,
) -> Result<(), BoardError> {
    if poll.owner != editor {
        return Err(BoardError::Forbidden("poll".into()));
    }
    if let Some(q) = question {
        poll.question = q;
    }
    if let Some(texts) = option_texts {
        for (idx, text) in texts.into_iter().enumerate() {
            if let Some(entry) = poll.options.get_mut(idx) {
                entry.text = text;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campustalk_store::PollDraft;
    use campustalk_types::PollId;

    fn fp(n: u8) -> Fingerprint {
        Fingerprint::new([n; 32])
    }

    fn yes_no_poll() -> PollRecord {
        PollRecord::from_draft(
            PollId::new(1),
            PollDraft {
                question: "Should the library stay open 24/7?".into(),
                option_texts: vec!["Yes".into(), "No".into()],
                expires_at: Timestamp::new(10_000),
                owner: fp(1),
                created_at: Timestamp::new(0),
            },
        )
    }

    #[test]
    fn first_vote_is_recorded() {
        let mut poll = yes_no_poll();
        cast_vote(&mut poll, fp(9), OptionId::new(0), Timestamp::new(100)).unwrap();
        assert_eq!(poll.options[0].votes, 1);
        assert_eq!(poll.options[1].votes, 0);
        assert!(poll.voters.contains(&fp(9)));
        assert!(poll.counters_consistent());
    }

    #[test]
    fn second_vote_same_fingerprint_rejected() {
        let mut poll = yes_no_poll();
        cast_vote(&mut poll, fp(9), OptionId::new(0), Timestamp::new(100)).unwrap();

        let err = cast_vote(&mut poll, fp(9), OptionId::new(1), Timestamp::new(200)).unwrap_err();
        assert!(matches!(err, BoardError::AlreadyVoted));
        assert_eq!(poll.options[0].votes, 1);
        assert_eq!(poll.options[1].votes, 0);
        assert!(poll.counters_consistent());
    }

    #[test]
    fn expired_poll_rejects_votes() {
        let mut poll = yes_no_poll();
        let err = cast_vote(&mut poll, fp(9), OptionId::new(0), Timestamp::new(10_001)).unwrap_err();
        assert!(matches!(err, BoardError::Expired));
        assert_eq!(poll.total_votes(), 0);
    }

    #[test]
    fn vote_at_expiry_instant_still_counts() {
        let mut poll = yes_no_poll();
        cast_vote(&mut poll, fp(9), OptionId::new(0), Timestamp::new(10_000)).unwrap();
        assert_eq!(poll.total_votes(), 1);
    }

    #[test]
    fn unknown_option_rejected_without_mutation() {
        let mut poll = yes_no_poll();
        let err = cast_vote(&mut poll, fp(9), OptionId::new(5), Timestamp::new(100)).unwrap_err();
        assert!(matches!(err, BoardError::InvalidOption(5)));
        assert!(poll.voters.is_empty());
        assert_eq!(poll.total_votes(), 0);
    }

    #[test]
    fn votes_from_distinct_fingerprints_accumulate() {
        let mut poll = yes_no_poll();
        cast_vote(&mut poll, fp(2), OptionId::new(0), Timestamp::new(10)).unwrap();
        cast_vote(&mut poll, fp(3), OptionId::new(0), Timestamp::new(20)).unwrap();
        cast_vote(&mut poll, fp(4), OptionId::new(1), Timestamp::new(30)).unwrap();
        assert_eq!(poll.options[0].votes, 2);
        assert_eq!(poll.options[1].votes, 1);
        assert_eq!(poll.voters.len(), 3);
        assert!(poll.counters_consistent());
    }

    #[test]
    fn edit_by_non_owner_is_forbidden() {
        let mut poll = yes_no_poll();
        let err = edit_poll(&mut poll, fp(2), Some("new question".into()), None).unwrap_err();
        assert!(matches!(err, BoardError::Forbidden(_)));
        assert_eq!(poll.question, "Should the library stay open 24/7?");
    }

    #[test]
    fn edit_updates_text_but_never_counts() {
        let mut poll = yes_no_poll();
        cast_vote(&mut poll, fp(9), OptionId::new(0), Timestamp::new(10)).unwrap();

        edit_poll(
            &mut poll,
            fp(1),
            Some("Library hours?".into()),
            Some(vec!["Absolutely".into(), "Never".into()]),
        )
        .unwrap();

        assert_eq!(poll.question, "Library hours?");
        assert_eq!(poll.options[0].text, "Absolutely");
        assert_eq!(poll.options[0].votes, 1);
        assert_eq!(poll.options[1].votes, 0);
        assert_eq!(poll.voters.len(), 1);
    }

    #[test]
    fn surplus_option_texts_are_ignored() {
        let mut poll = yes_no_poll();
        edit_poll(
            &mut poll,
            fp(1),
            None,
            Some(vec!["A".into(), "B".into(), "C".into()]),
        )
        .unwrap();
        assert_eq!(poll.options.len(), 2);
        assert_eq!(poll.options[1].text, "B");
    }

    #[test]
    fn partial_option_texts_touch_only_prefix() {
        let mut poll = yes_no_poll();
        edit_poll(&mut poll, fp(1), None, Some(vec!["Maybe".into()])).unwrap();
        assert_eq!(poll.options[0].text, "Maybe");
        assert_eq!(poll.options[1].text, "No");
    }
}
