use crate::types::*;

/// Player 0 takes the match when both fall on the same frame.
pub const TIE_BREAK_WINNER: PlayerId = 0;

/// True once either combatant is out of health.
pub fn is_terminal(players: &[Combatant; 2]) -> bool {
    players.iter().any(|p| p.health <= 0)
}

/// The combatant still standing, or the tie-break if neither is.
/// `None` while the match is still running.
pub fn winner(players: &[Combatant; 2]) -> Option<PlayerId> {
    match (players[0].health <= 0, players[1].health <= 0) {
        (false, false) => None,
        (true, false) => Some(players[1].id),
        (false, true) => Some(players[0].id),
        (true, true) => Some(TIE_BREAK_WINNER),
    }
}

/// Final standings of a match, as reported by the replay host.
pub fn summarize(state: &GameState, config: &MatchConfig) -> MatchSummary {
    MatchSummary {
        ticks: state.tick,
        match_over: state.match_over,
        winner: state.winner,
        winner_name: state.winner.map(|w| config.players[w].name.clone()),
        health: [state.players[0].health, state.players[1].health],
    }
}
