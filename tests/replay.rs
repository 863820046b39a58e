use std::sync::{mpsc, Arc};
use std::time::Duration;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use pacman_lite::{Direction, Layout, Pos, Runner, Simulation, Snapshot, CARDINALS};

/// Replays a fixed list of `CARDINALS` indices. Each word repeats the index in
/// its top and bottom bits so it decodes the same however the range is sampled.
struct ScriptedRng {
    picks: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    fn new(picks: &[u32]) -> Self {
        Self {
            picks: picks.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let k = self.picks[self.next % self.picks.len()];
        self.next += 1;
        (k << 30) | k
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.next_u32() as u64;
        (word << 32) | word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn small<R: rand::Rng>(rng: R) -> Simulation<R> {
    let layout = Layout::Small;
    Simulation::new(
        Arc::new(layout.maze().unwrap()),
        layout.player_start(),
        layout.wanderer_start(),
        rng,
    )
    .unwrap()
}

fn trail<R: rand::Rng>(sim: &mut Simulation<R>, ticks: usize) -> Vec<Snapshot> {
    (0..ticks).map(|_| sim.tick(Direction::Idle)).collect()
}

#[test]
fn scripted_walk_matches_recorded_trail() {
    // Up, Up, Up, Left, Down, Right
    let mut sim = small(ScriptedRng::new(&[3, 3, 3, 1, 2, 0]));
    assert_eq!(CARDINALS[3], Direction::Up);

    let steps: Vec<(Pos, Direction)> = trail(&mut sim, 6)
        .into_iter()
        .map(|s| (s.wanderer.pos, s.wanderer.dir))
        .collect();

    assert_eq!(
        steps,
        vec![
            (Pos::new(3, 2), Direction::Up),
            (Pos::new(3, 1), Direction::Up),
            // (3,0) is a wall: the turn is refused and the step stalls
            (Pos::new(3, 1), Direction::Up),
            (Pos::new(2, 1), Direction::Left),
            // (2,2) is a wall: keeps heading left
            (Pos::new(1, 1), Direction::Left),
            (Pos::new(2, 1), Direction::Right),
        ]
    );
    assert_eq!(sim.player().position(), Layout::Small.player_start());
}

#[test]
fn seeded_walks_replay_identically() {
    let first = trail(&mut small(ChaCha8Rng::seed_from_u64(2024)), 100);
    let second = trail(&mut small(ChaCha8Rng::seed_from_u64(2024)), 100);
    assert_eq!(first, second);

    let maze = Layout::Small.maze().unwrap();
    let mut prev = Layout::Small.wanderer_start();
    for snap in &first {
        let pos = snap.wanderer.pos;
        assert!(maze.is_open_at(pos));
        assert!(pos.x.abs_diff(prev.x) + pos.y.abs_diff(prev.y) <= 1);
        prev = pos;
    }
}

#[test]
fn classic_board_keeps_agents_on_open_cells() {
    let layout = Layout::Classic;
    let maze = Arc::new(layout.maze().unwrap());
    let mut sim = Simulation::new(
        Arc::clone(&maze),
        layout.player_start(),
        layout.wanderer_start(),
        ChaCha8Rng::seed_from_u64(11),
    )
    .unwrap();
    let intents = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
    for tick in 0..500 {
        let snap = sim.tick(intents[(tick / 13) % intents.len()]);
        assert!(maze.is_open_at(snap.player.pos));
        assert!(maze.is_open_at(snap.wanderer.pos));
    }
}

#[test]
fn pause_resume_preserves_agents() {
    let mut runner = Runner::new(
        small(ChaCha8Rng::seed_from_u64(8)),
        Duration::from_millis(2),
    );
    runner.intent().set(Direction::Down);
    let (tx, rx) = mpsc::channel();

    runner.start(tx.clone()).unwrap();
    for _ in 0..5 {
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    runner.stop().unwrap();
    let paused = runner.snapshot();
    assert!(paused.tick >= 5);

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(runner.snapshot(), paused);

    let drained: Vec<Snapshot> = rx.try_iter().collect();
    if let Some(last) = drained.last() {
        assert_eq!(*last, paused);
    }

    runner.start(tx).unwrap();
    let resumed = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    runner.stop().unwrap();

    assert_eq!(resumed.tick, paused.tick + 1);
    assert_eq!(resumed.player.dir, paused.player.dir);
    for (before, after) in [
        (paused.player, resumed.player),
        (paused.wanderer, resumed.wanderer),
    ] {
        let moved = before.pos.x.abs_diff(after.pos.x) + before.pos.y.abs_diff(after.pos.y);
        assert!(moved <= 1);
    }
}
