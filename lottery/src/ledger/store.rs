use rand::Rng;
use super::errors::LedgerError;
use super::model::{Participant, Prize, SourceRecord, Winner};

/// What a successful award hands back: the winner record and the prize as it
/// stands after the decrement.
#[derive(Debug, Clone, PartialEq)]
pub struct Award {
    pub winner: Winner,
    pub prize: Prize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStats {
    pub participants: usize,
    pub prizes: usize,
    pub winners: usize,
    pub remaining_prizes: u32
}

/// In-memory participants, prize inventory and winner ledger.
///
/// Every mutating operation validates all of its inputs before touching any
/// collection, so a rejected call leaves the store exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    participants: Vec<Participant>,
    prizes: Vec<Prize>,
    winners: Vec<Winner>
}

impl LedgerStore {
    pub fn new() -> LedgerStore {
        LedgerStore::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    /// Names laid out on the wheel, in pool order.
    pub fn segments(&self) -> Vec<String> {
        self.participants.iter().map(|participant| participant.name.clone()).collect()
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|participant| participant.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|participant| participant.name == name)
    }

    /// Replace the whole pool, typically after an import.
    pub fn set_participants(&mut self, participants: Vec<Participant>) {
        info!("Participant pool replaced with {} entries", participants.len());
        self.participants = participants;
    }

    pub fn add_participant(&mut self, name: &str, student_id: Option<&str>) -> Result<Participant, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidManualEntry);
        }
        let student_id = student_id.map(|id| id.trim()).unwrap_or("");
        let participant = Participant::new(name, student_id, SourceRecord::new());
        debug!("Participant {} added manually", participant.name);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    pub fn remove_participant(&mut self, id: &str) -> Result<Participant, LedgerError> {
        let position = self.participant_position(id)?;
        Ok(self.participants.remove(position))
    }

    pub fn add_prize(&mut self, name: &str, image: &str, quantity: u32) -> Result<Prize, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidManualEntry);
        }
        if quantity == 0 {
            return Err(LedgerError::InvalidPrizeQuantity);
        }
        let prize = Prize::new(name, image.trim(), quantity);
        debug!("Prize {} added with quantity {}", prize.name, quantity);
        self.prizes.push(prize.clone());
        Ok(prize)
    }

    /// Take one unit out of a prize. An exhausted prize stays at zero.
    pub fn decrease_prize_quantity(&mut self, id: &str) -> Result<&Prize, LedgerError> {
        match self.prizes.iter_mut().find(|prize| prize.id == id) {
            Some(prize) => {
                if prize.quantity > 0 {
                    prize.quantity -= 1;
                }
                Ok(&*prize)
            }
            None => Err(LedgerError::UnknownPrize { id: id.to_owned() })
        }
    }

    /// Uniform pick among the prizes that still have stock.
    pub fn random_prize<R: Rng>(&self, rng: &mut R) -> Option<&Prize> {
        self.pick_available_prize(rng).map(|position| &self.prizes[position])
    }

    /// Award a prize to a participant still in the pool.
    ///
    /// Picks a prize uniformly among the available ones, decrements it, appends
    /// the winner and removes the participant. When no prize is left nothing
    /// changes and the participant stays in the pool.
    pub fn award_prize<R: Rng>(&mut self, participant_id: &str, rng: &mut R) -> Result<Award, LedgerError> {
        let position = self.participant_position(participant_id)?;
        let prize_position = match self.pick_available_prize(rng) {
            Some(prize_position) => prize_position,
            None => {
                warn!("No prize left for {}", self.participants[position].name);
                return Err(LedgerError::NoPrizesAvailable);
            }
        };

        let participant = self.participants.remove(position);
        let prize = &mut self.prizes[prize_position];
        prize.quantity -= 1;
        let winner = Winner::from_participant(participant, &prize.name);
        self.winners.push(winner.clone());
        info!("{} won {} ({} left)", winner.name, prize.name, prize.quantity);
        Ok(Award { winner, prize: prize.clone() })
    }

    /// Cross-reference a drawn name against the pool, first match wins.
    pub fn award_prize_to_name<R: Rng>(&mut self, name: &str, rng: &mut R) -> Result<Award, LedgerError> {
        let id = self.find_by_name(name)
            .map(|participant| participant.id.clone())
            .ok_or_else(|| LedgerError::UnknownParticipant { id: name.to_owned() })?;
        self.award_prize(&id, rng)
    }

    pub fn clear_winners(&mut self) {
        info!("Clearing {} winners", self.winners.len());
        self.winners.clear();
    }

    pub fn remaining_prize_count(&self) -> u32 {
        self.prizes.iter().map(|prize| prize.quantity).sum()
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            participants: self.participants.len(),
            prizes: self.prizes.len(),
            winners: self.winners.len(),
            remaining_prizes: self.remaining_prize_count()
        }
    }

    fn participant_position(&self, id: &str) -> Result<usize, LedgerError> {
        self.participants.iter()
            .position(|participant| participant.id == id)
            .ok_or_else(|| LedgerError::UnknownParticipant { id: id.to_owned() })
    }

    fn pick_available_prize<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let available: Vec<usize> = self.prizes.iter()
            .enumerate()
            .filter(|&(_, prize)| prize.is_available())
            .map(|(position, _)| position)
            .collect();
        if available.is_empty() {
            None
        } else {
            Some(available[rng.gen_range(0, available.len())])
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, SeedableRng};
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    fn store_with(names: &[&str]) -> LedgerStore {
        let mut store = LedgerStore::new();
        for name in names {
            store.add_participant(name, None).unwrap();
        }
        store
    }

    #[test]
    fn test_add_participant() {
        let mut store = LedgerStore::new();
        let alice = store.add_participant("  Alice ", Some("21t1020001")).unwrap();
        assert_eq!(alice.name, "Alice (21t1020001)");
        assert_eq!(alice.student_id, "21t1020001");
        let bob = store.add_participant("Bob", None).unwrap();
        assert_eq!(bob.name, "Bob");
        assert_eq!(store.segments(), vec!["Alice (21t1020001)".to_owned(), "Bob".to_owned()]);
    }

    #[test]
    fn test_reject_empty_manual_entry() {
        let mut store = store_with(&["Alice"]);
        assert_eq!(store.add_participant("   ", None), Err(LedgerError::InvalidManualEntry));
        assert_eq!(store.add_prize("", "img.png", 1), Err(LedgerError::InvalidManualEntry));
        assert_eq!(store.add_prize("Mug", "", 0), Err(LedgerError::InvalidPrizeQuantity));
        assert_eq!(store.participants().len(), 1);
        assert!(store.prizes().is_empty());
    }

    #[test]
    fn test_award_prize() {
        let mut store = store_with(&["Alice", "Bob"]);
        store.add_prize("Mug", "mug.png", 2).unwrap();
        let alice = store.find_by_name("Alice").unwrap().clone();

        let award = store.award_prize(&alice.id, &mut thread_rng()).unwrap();

        assert_eq!(award.winner.id, alice.id);
        assert_eq!(award.winner.prize, "Mug");
        assert_eq!(award.prize.quantity, 1);
        assert_eq!(store.winners().len(), 1);
        assert!(store.participant(&alice.id).is_none());
        assert_eq!(store.participants().len(), 1);
        assert_eq!(store.remaining_prize_count(), 1);
    }

    #[test]
    fn test_last_prize_then_no_prizes_available() {
        let mut store = store_with(&["Alice", "Bob"]);
        store.add_prize("Bike", "", 1).unwrap();

        store.award_prize_to_name("Alice", &mut thread_rng()).unwrap();
        let result = store.award_prize_to_name("Bob", &mut thread_rng());

        assert_eq!(result, Err(LedgerError::NoPrizesAvailable));
        assert_eq!(store.winners().len(), 1);
        assert!(store.find_by_name("Bob").is_some());
        // exhausted prizes stay listed
        assert_eq!(store.prizes().len(), 1);
        assert!(store.prizes()[0].is_exhausted());
    }

    #[test]
    fn test_award_unknown_participant_changes_nothing() {
        let mut store = store_with(&["Alice"]);
        store.add_prize("Mug", "", 1).unwrap();
        let result = store.award_prize("missing", &mut thread_rng());
        assert_matches!(result, Err(LedgerError::UnknownParticipant { .. }));
        assert_eq!(store.remaining_prize_count(), 1);
        assert!(store.winners().is_empty());
        assert_eq!(store.participants().len(), 1);
    }

    #[test]
    fn test_awards_never_exceed_stock() {
        let names: Vec<String> = (0..20).map(|i| format!("Player {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(|name| name.as_str()).collect();
        let mut store = store_with(&refs);
        store.add_prize("Mug", "", 3).unwrap();
        store.add_prize("Shirt", "", 2).unwrap();
        store.add_prize("Bike", "", 1).unwrap();

        let mut rng = thread_rng();
        let mut failures = 0;
        for name in &refs {
            match store.award_prize_to_name(name, &mut rng) {
                Ok(_) => {}
                Err(LedgerError::NoPrizesAvailable) => failures += 1,
                Err(other) => panic!("unexpected error {}", other)
            }
        }

        assert_eq!(store.winners().len(), 6);
        assert_eq!(failures, 14);
        assert_eq!(store.remaining_prize_count(), 0);
        for prize in store.prizes() {
            let won = store.winners().iter().filter(|winner| winner.prize == prize.name).count();
            assert_eq!(won as u32, prize.total_quantity);
            assert_eq!(prize.awarded(), prize.total_quantity);
        }

        let pool: HashSet<&str> = store.participants().iter().map(|p| p.id.as_str()).collect();
        assert!(store.winners().iter().all(|winner| !pool.contains(winner.id.as_str())));
    }

    #[test]
    fn test_random_prize_only_picks_available() {
        let mut store = LedgerStore::new();
        let empty = store.add_prize("Gone", "", 1).unwrap();
        store.add_prize("Mug", "", 1).unwrap();
        store.decrease_prize_quantity(&empty.id).unwrap();
        let mut rng = thread_rng();
        for _ in 0..50 {
            assert_eq!(store.random_prize(&mut rng).map(|prize| prize.name.as_str()), Some("Mug"));
        }
    }

    #[test]
    fn test_prize_choice_is_uniform() {
        let mut store = LedgerStore::new();
        store.add_prize("Mug", "", 10).unwrap();
        store.add_prize("Shirt", "", 1).unwrap();
        store.add_prize("Bike", "", 1000).unwrap();
        let mut rng = StdRng::from_seed([42u8; 32]);

        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..3000 {
            let prize = store.random_prize(&mut rng).unwrap();
            *counts.entry(prize.name.clone()).or_insert(0) += 1;
        }

        // stock does not weight the pick, each available prize gets about a third
        assert_eq!(counts.len(), 3);
        for (name, count) in &counts {
            assert!(*count > 850 && *count < 1150, "{} picked {} times out of 3000", name, count);
        }
    }

    #[test]
    fn test_decrease_prize_quantity_stops_at_zero() {
        let mut store = LedgerStore::new();
        let prize = store.add_prize("Mug", "", 1).unwrap();
        assert_eq!(store.decrease_prize_quantity(&prize.id).unwrap().quantity, 0);
        assert_eq!(store.decrease_prize_quantity(&prize.id).unwrap().quantity, 0);
        assert_matches!(store.decrease_prize_quantity("missing"), Err(LedgerError::UnknownPrize { .. }));
    }

    #[test]
    fn test_clear_winners_keeps_pool_and_prizes() {
        let mut store = store_with(&["Alice", "Bob", "Carol"]);
        store.add_prize("Mug", "", 5).unwrap();
        store.award_prize_to_name("Bob", &mut thread_rng()).unwrap();
        let participants = store.participants().to_vec();
        let prizes = store.prizes().to_vec();

        store.clear_winners();

        assert!(store.winners().is_empty());
        assert_eq!(store.participants(), participants.as_slice());
        assert_eq!(store.prizes(), prizes.as_slice());
    }

    #[test]
    fn test_remove_participant_and_stats() {
        let mut store = store_with(&["Alice", "Bob"]);
        store.add_prize("Mug", "", 2).unwrap();
        store.add_prize("Pen", "", 3).unwrap();
        let bob = store.find_by_name("Bob").unwrap().id.clone();
        store.remove_participant(&bob).unwrap();
        assert_matches!(store.remove_participant(&bob), Err(LedgerError::UnknownParticipant { .. }));
        assert_eq!(store.stats(), LedgerStats { participants: 1, prizes: 2, winners: 0, remaining_prizes: 5 });
    }
}
