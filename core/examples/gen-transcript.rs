//! Generates match transcript JSON for the replay host.
//!
//! Usage:
//!   cargo run -p stickfight-core --example gen-transcript -- [idle|duel|archery] > transcript.json

use stickfight_core::*;

/// Ten seconds of play at the fixed tick rate.
const FRAMES: u32 = 10 * TICK_RATE;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let (config, frames): (MatchConfig, Vec<[PlayerInput; 2]>) = match mode.as_str() {
        "idle" => {
            // Nobody moves, nobody wins
            (default_config(), vec![[NULL_INPUT; 2]; FRAMES as usize])
        }
        "duel" => {
            // P0 walks in and swings on a fixed rhythm, P1 guards every other second
            let config = match_config([Weapon::Sword, Weapon::Sword]);
            let frames = (0..FRAMES)
                .map(|tick| {
                    let p0 = if tick < 70 {
                        button::RIGHT
                    } else if tick % 12 == 0 {
                        button::ATTACK
                    } else {
                        0
                    };
                    let p1 = if (tick / TICK_RATE) % 2 == 1 { button::DEFEND } else { 0 };
                    [PlayerInput::new(p0), PlayerInput::new(p1)]
                })
                .collect();
            (config, frames)
        }
        "archery" => {
            // P0 looses arrows from spawn, P1 charges in with a sword
            let config = match_config([Weapon::Bow, Weapon::Sword]);
            let frames = (0..FRAMES)
                .map(|tick| {
                    let p0 = if tick % 8 == 0 { button::ATTACK } else { 0 };
                    let p1 = if tick % 90 == 45 {
                        button::LEFT | button::JUMP
                    } else if tick % 10 == 0 {
                        button::LEFT | button::ATTACK
                    } else {
                        button::LEFT
                    };
                    [PlayerInput::new(p0), PlayerInput::new(p1)]
                })
                .collect();
            (config, frames)
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'duel', or 'archery'", mode);
            std::process::exit(1);
        }
    };

    // Verify by running the sim
    let mut state = create_initial_state(&config);
    let mut prev_inputs = [NULL_INPUT; 2];
    let mut arrows_fired = 0;
    for inputs in &frames {
        let before = state.next_arrow_id;
        state = step(&state, inputs, &prev_inputs, &config);
        arrows_fired += state.next_arrow_id - before;
        prev_inputs = *inputs;
        if state.match_over {
            break;
        }
    }

    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Final tick: {}", state.tick);
    eprintln!("Match over: {}", state.match_over);
    match state.winner {
        Some(w) => eprintln!("Winner: {}", config.players[w].name),
        None => eprintln!("Winner: none"),
    }
    eprintln!(
        "Health: P0={}, P1={}",
        state.players[0].health, state.players[1].health
    );
    eprintln!("Arrows fired: {}", arrows_fired);

    let transcript = MatchTranscript { config, frames };
    println!("{}", serde_json::to_string(&transcript).unwrap());
}
