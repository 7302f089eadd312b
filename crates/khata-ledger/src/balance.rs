use khata_types::{LogKind, Money};

use crate::entry::Log;

/// One replayed log with the balance outstanding after it was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceLine {
    pub log: Log,
    pub running: Money,
}

/// Replay a log collection into chronological balance lines.
///
/// Logs are sorted ascending by `(date, id)`, the id tie-break making
/// same-day entries totally ordered, then replayed from zero: a `Due`
/// entry raises the running balance, an `Add` entry lowers it. The input
/// order is irrelevant; only the sort order matters.
pub fn replay(logs: &[Log]) -> Vec<BalanceLine> {
    let mut sorted: Vec<Log> = logs.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut running = Money::ZERO;
    sorted
        .into_iter()
        .map(|log| {
            match log.kind {
                LogKind::Due => running += log.amount,
                LogKind::Add => running -= log.amount,
            }
            BalanceLine { log, running }
        })
        .collect()
}

/// The replay in display order: most recent entry first.
///
/// Reversing happens after the forward replay; reversing first would
/// attach the wrong running balances.
pub fn statement(logs: &[Log]) -> Vec<BalanceLine> {
    let mut lines = replay(logs);
    lines.reverse();
    lines
}

/// Balance outstanding after the last entry.
pub fn closing(logs: &[Log]) -> Money {
    replay(logs).last().map(|line| line.running).unwrap_or(Money::ZERO)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use khata_types::LogId;
    use proptest::prelude::*;

    use crate::ledger::Totals;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn log_on(kind: LogKind, units: i64, day: &str) -> Log {
        Log::new(kind, Money::from_units(units), date(day))
    }

    #[test]
    fn due_then_payment() {
        let logs = vec![
            log_on(LogKind::Due, 500, "2024-03-01"),
            log_on(LogKind::Add, 200, "2024-03-02"),
        ];
        let lines = replay(&logs);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].running, Money::from_units(500));
        assert_eq!(lines[1].running, Money::from_units(300));
        assert_eq!(closing(&logs), Money::from_units(300));
    }

    #[test]
    fn empty_collection_closes_at_zero() {
        assert!(replay(&[]).is_empty());
        assert_eq!(closing(&[]), Money::ZERO);
    }

    #[test]
    fn same_day_ties_break_by_id_as_string() {
        // "b" inserted first, "a" second; chronological order must still
        // replay "a" before "b".
        let day = date("2024-03-01");
        let mut b = Log::new(LogKind::Due, Money::from_units(100), day);
        b.id = LogId::from_uuid(uuid_from_byte(0xbb));
        let mut a = Log::new(LogKind::Due, Money::from_units(50), day);
        a.id = LogId::from_uuid(uuid_from_byte(0xaa));

        let lines = replay(&[b.clone(), a.clone()]);
        assert_eq!(lines[0].log.id, a.id);
        assert_eq!(lines[0].running, Money::from_units(50));
        assert_eq!(lines[1].log.id, b.id);
        assert_eq!(lines[1].running, Money::from_units(150));

        let display = statement(&[b.clone(), a.clone()]);
        assert_eq!(display[0].running, Money::from_units(150));
        assert_eq!(display[1].running, Money::from_units(50));
    }

    #[test]
    fn statement_is_reverse_of_replay() {
        let logs = vec![
            log_on(LogKind::Due, 500, "2024-03-01"),
            log_on(LogKind::Add, 200, "2024-03-02"),
            log_on(LogKind::Due, 150, "2024-03-03"),
        ];
        let mut forward = replay(&logs);
        forward.reverse();
        assert_eq!(statement(&logs), forward);
    }

    #[test]
    fn payment_first_goes_negative() {
        let logs = vec![
            log_on(LogKind::Add, 200, "2024-03-01"),
            log_on(LogKind::Due, 500, "2024-03-02"),
        ];
        let lines = replay(&logs);
        assert_eq!(lines[0].running, -Money::from_units(200));
        assert_eq!(lines[1].running, Money::from_units(300));
    }

    #[test]
    fn closing_matches_totals_balance() {
        let logs = vec![
            log_on(LogKind::Due, 650, "2024-03-01"),
            log_on(LogKind::Add, 200, "2024-03-05"),
            log_on(LogKind::Due, 75, "2024-02-20"),
        ];
        assert_eq!(closing(&logs), Totals::from_logs(&logs).balance());
    }

    fn uuid_from_byte(b: u8) -> uuid::Uuid {
        uuid::Uuid::from_u128(u128::from(b))
    }

    fn arb_log() -> impl Strategy<Value = Log> {
        (
            any::<u128>(),
            0u32..60,
            1i64..100_000,
            any::<bool>(),
        )
            .prop_map(|(id_bits, day_offset, cents, is_due)| {
                let base = date("2024-01-01");
                let kind = if is_due { LogKind::Due } else { LogKind::Add };
                Log {
                    id: LogId::from_uuid(uuid::Uuid::from_u128(id_bits)),
                    date: base + chrono::Days::new(u64::from(day_offset)),
                    time: "09:30".into(),
                    kind,
                    amount: Money::new(rust_decimal::Decimal::new(cents, 2)),
                }
            })
    }

    proptest! {
        #[test]
        fn replay_ignores_input_order(logs in prop::collection::vec(arb_log(), 0..16)) {
            let mut reversed = logs.clone();
            reversed.reverse();
            prop_assert_eq!(replay(&logs), replay(&reversed));

            let mut rotated = logs.clone();
            if !rotated.is_empty() {
                rotated.rotate_left(logs.len() / 2);
            }
            prop_assert_eq!(replay(&logs), replay(&rotated));
        }

        #[test]
        fn replay_is_idempotent(logs in prop::collection::vec(arb_log(), 0..16)) {
            prop_assert_eq!(replay(&logs), replay(&logs));
        }

        #[test]
        fn closing_agrees_with_aggregate(logs in prop::collection::vec(arb_log(), 0..16)) {
            prop_assert_eq!(closing(&logs), Totals::from_logs(&logs).balance());
        }
    }
}
