use khata_ledger::DueLedger;
use khata_types::CustomerId;

/// The "currently open customer" across snapshot refreshes.
///
/// Selection is stored purely as an id and re-resolved against the latest
/// snapshot on every read, never as a held reference to a stale record.
/// A refresh that drops the record simply makes the selection resolve to
/// nothing; the id is kept so a later snapshot can resolve it again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    selected: Option<CustomerId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: CustomerId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<CustomerId> {
        self.selected
    }

    /// Resolve the selection against a snapshot.
    pub fn resolve<'a>(&self, snapshot: &'a [DueLedger]) -> Option<&'a DueLedger> {
        let id = self.selected?;
        snapshot.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use khata_types::Money;

    use super::*;

    fn customer(name: &str) -> DueLedger {
        DueLedger {
            id: CustomerId::new(),
            customer_name: name.into(),
            mobile: None,
            image: None,
            date: "2024-03-01".parse::<NaiveDate>().unwrap(),
            amount: Money::ZERO,
            paid: Money::ZERO,
            logs: vec![],
        }
    }

    #[test]
    fn resolves_against_latest_snapshot() {
        let a = customer("A");
        let b = customer("B");
        let mut session = Session::new();
        session.select(b.id);

        let snapshot = vec![a.clone(), b.clone()];
        assert_eq!(session.resolve(&snapshot).unwrap().id, b.id);

        // The record mutates across a refresh; resolution picks up the
        // fresh copy because only the id was held.
        let mut b2 = b.clone();
        b2.amount = Money::from_units(100);
        let refreshed = vec![a, b2.clone()];
        assert_eq!(session.resolve(&refreshed).unwrap().amount, b2.amount);
    }

    #[test]
    fn missing_record_resolves_to_none() {
        let mut session = Session::new();
        session.select(CustomerId::new());
        assert!(session.resolve(&[customer("A")]).is_none());
    }

    #[test]
    fn clear_drops_selection() {
        let a = customer("A");
        let mut session = Session::new();
        session.select(a.id);
        session.clear();
        assert_eq!(session.selected_id(), None);
        assert!(session.resolve(&[a]).is_none());
    }
}
