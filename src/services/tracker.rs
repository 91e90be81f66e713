use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::domain::{
    self, filter, take_match, GameType, Inbox, Match, MatchLocation, QuickAdd, Tournament,
};
use crate::stats::{self, StatsReport, TournamentSummary};
use crate::store::TournamentStore;

/// Match bookkeeping on top of whichever store is configured
#[derive(Clone)]
pub struct TrackerService {
    store: Arc<dyn TournamentStore>,
}

impl TrackerService {
    pub fn new(store: Arc<dyn TournamentStore>) -> Self {
        Self { store }
    }

    /// Tournaments the user sees; the inbox is never part of this list
    pub fn real_tournaments(&self) -> Result<Vec<Tournament>> {
        self.store.list()
    }

    pub fn tournaments_for(&self, game_type: Option<GameType>) -> Result<Vec<Tournament>> {
        Ok(filter::by_optional_game_type(self.real_tournaments()?, game_type))
    }

    pub fn tournament(&self, id: &str) -> Result<Option<Tournament>> {
        self.store.get_by_id(id)
    }

    pub fn save_tournament(&self, tournament: &Tournament) -> Result<()> {
        self.store.save(tournament)?;
        info!("Saved tournament {} ({} matches)", tournament.id, tournament.matches.len());
        Ok(())
    }

    pub fn delete_tournament(&self, id: &str) -> Result<()> {
        self.store.delete(id)?;
        info!("Deleted tournament {}", id);
        Ok(())
    }

    pub fn inbox(&self) -> Result<Inbox> {
        self.store.inbox()
    }

    /// Appends a match. False when the target tournament does not exist.
    pub fn add_match(&self, target: &MatchLocation, m: Match) -> Result<bool> {
        self.edit_container(target, |matches| {
            matches.push(m);
            true
        })
    }

    /// Replaces the match with `match_id` in place
    pub fn update_match(
        &self,
        target: &MatchLocation,
        match_id: &str,
        updated: Match,
    ) -> Result<bool> {
        self.edit_container(target, |matches| {
            match matches.iter_mut().find(|m| m.id == match_id) {
                Some(slot) => {
                    *slot = updated;
                    true
                }
                None => false,
            }
        })
    }

    pub fn delete_match(&self, target: &MatchLocation, match_id: &str) -> Result<bool> {
        self.edit_container(target, |matches| take_match(matches, match_id).is_some())
    }

    pub fn move_match(
        &self,
        match_id: &str,
        from: &MatchLocation,
        to: &MatchLocation,
    ) -> Result<bool> {
        let moved = self.store.move_match(match_id, from, to)?;
        if moved {
            info!("Moved match {} from {} to {}", match_id, from, to);
        }
        Ok(moved)
    }

    /// Files an inbox match under a real tournament
    pub fn organize(&self, match_id: &str, tournament_id: &str) -> Result<bool> {
        let target = MatchLocation::from_wire_id(tournament_id);
        self.move_match(match_id, &MatchLocation::Inbox, &target)
    }

    pub fn quick_add(&self, entry: QuickAdd) -> Result<String> {
        let m = entry.into_match()?;
        let id = m.id.clone();
        self.add_match(&MatchLocation::Inbox, m)?;
        info!("Quick-added match {} to inbox", id);
        Ok(id)
    }

    pub fn deck_names(&self) -> Result<Vec<String>> {
        let tournaments = self.store.list()?;
        let inbox = self.store.inbox()?;
        Ok(domain::deck_names(&tournaments, &inbox))
    }

    pub fn stats(&self, game_type: Option<GameType>) -> Result<StatsReport> {
        let tournaments = self.tournaments_for(game_type)?;
        Ok(stats::report(&tournaments))
    }

    pub fn summary(&self, id: &str) -> Result<Option<TournamentSummary>> {
        Ok(self.store.get_by_id(id)?.as_ref().map(stats::tournament_summary))
    }

    /// Applies `edit` to the container as one store operation, so parallel
    /// edits never overwrite each other
    fn edit_container<F>(&self, target: &MatchLocation, edit: F) -> Result<bool>
    where
        F: FnOnce(&mut Vec<Match>) -> bool,
    {
        let mut edit = Some(edit);
        self.store
            .edit_matches(target, &mut |matches| edit.take().is_some_and(|e| e(matches)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract::{sample_match, sample_tournament};
    use crate::store::JsonFileStore;

    fn temp_service() -> (tempfile::TempDir, TrackerService) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("tournaments.json")).unwrap();
        (dir, TrackerService::new(Arc::new(store)))
    }

    fn match_ids(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_add_update_delete_match() {
        let (_dir, service) = temp_service();
        service.save_tournament(&sample_tournament("t1", vec![])).unwrap();
        let target = MatchLocation::Tournament("t1".to_string());

        assert!(service.add_match(&target, sample_match("m1")).unwrap());
        assert!(service.add_match(&target, sample_match("m2")).unwrap());

        let mut edited = sample_match("m1");
        edited.opponent_deck = "Tron".to_string();
        assert!(service.update_match(&target, "m1", edited).unwrap());
        assert!(!service.update_match(&target, "nope", sample_match("nope")).unwrap());

        let tournament = service.tournament("t1").unwrap().unwrap();
        assert_eq!(match_ids(&tournament.matches), vec!["m1", "m2"]);
        assert_eq!(tournament.matches[0].opponent_deck, "Tron");

        assert!(service.delete_match(&target, "m1").unwrap());
        let tournament = service.tournament("t1").unwrap().unwrap();
        assert_eq!(match_ids(&tournament.matches), vec!["m2"]);
    }

    #[test]
    fn test_add_match_to_unknown_tournament() {
        let (_dir, service) = temp_service();
        let target = MatchLocation::Tournament("ghost".to_string());

        assert!(!service.add_match(&target, sample_match("m1")).unwrap());
        assert!(service.real_tournaments().unwrap().is_empty());
    }

    #[test]
    fn test_quick_add_then_organize() {
        let (_dir, service) = temp_service();
        service.save_tournament(&sample_tournament("t1", vec![])).unwrap();

        let id = service
            .quick_add(QuickAdd {
                my_deck: "Burn".to_string(),
                opponent_deck: "Zoo".to_string(),
                on_play: true,
                result: "2-1".to_string(),
                notes: None,
            })
            .unwrap();

        assert_eq!(match_ids(&service.inbox().unwrap().matches), vec![id.as_str()]);
        // inbox matches never count toward statistics
        assert_eq!(service.stats(None).unwrap().overall.total_match_wins, 0);

        assert!(service.organize(&id, "t1").unwrap());
        assert!(service.inbox().unwrap().matches.is_empty());
        assert_eq!(service.stats(None).unwrap().overall.total_match_wins, 1);
        assert!(!service.organize(&id, "t1").unwrap());
    }

    #[test]
    fn test_deck_names_include_inbox() {
        let (_dir, service) = temp_service();
        service.save_tournament(&sample_tournament("t1", vec![sample_match("m1")])).unwrap();
        let mut inbox_match = sample_match("m2");
        inbox_match.my_deck = "Affinity".to_string();
        service.add_match(&MatchLocation::Inbox, inbox_match).unwrap();

        assert_eq!(service.deck_names().unwrap(), vec!["Affinity", "Burn", "Control"]);
    }

    #[test]
    fn test_stats_filter_by_game_type() {
        let (_dir, service) = temp_service();
        // sample tournaments are Riftbound
        service.save_tournament(&sample_tournament("t1", vec![sample_match("m1")])).unwrap();

        assert_eq!(service.stats(Some(GameType::Magic)).unwrap().overall.total_match_wins, 0);
        assert_eq!(service.stats(Some(GameType::Riftbound)).unwrap().overall.total_match_wins, 1);
    }

    #[test]
    fn test_summary() {
        let (_dir, service) = temp_service();
        service.save_tournament(&sample_tournament("t1", vec![sample_match("m1")])).unwrap();

        let summary = service.summary("t1").unwrap().unwrap();
        assert_eq!(summary.match_wins, 1);
        assert_eq!(summary.game_wins, 2);
        assert_eq!(summary.game_losses, 1);
        assert!(service.summary("missing").unwrap().is_none());
    }

    #[test]
    fn test_parallel_quick_adds_and_organize_keep_every_match() {
        let (_dir, service) = temp_service();
        service.save_tournament(&sample_tournament("t1", vec![])).unwrap();
        service.add_match(&MatchLocation::Inbox, sample_match("seed")).unwrap();
        let barrier = std::sync::Barrier::new(9);

        std::thread::scope(|scope| {
            for writer in 0..8 {
                let (service, barrier) = (&service, &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    for i in 0..20 {
                        let id = format!("w{}-{}", writer, i);
                        service.add_match(&MatchLocation::Inbox, sample_match(&id)).unwrap();
                    }
                });
            }
            barrier.wait();
            assert!(service.organize("seed", "t1").unwrap());
        });

        let inbox = service.inbox().unwrap();
        let tournament = service.tournament("t1").unwrap().unwrap();
        assert_eq!(inbox.matches.len(), 160);
        assert_eq!(match_ids(&tournament.matches), vec!["seed"]);
        assert!(inbox.matches.iter().all(|m| m.id != "seed"));
    }
}
