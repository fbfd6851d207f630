pub mod engine;
pub mod player;
pub mod save;
pub mod world;

use chrono::{DateTime, NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use engine::{
    Command, Encounter, Output, buy, handle_explore, handle_fight, handle_heal, handle_inventory,
    handle_use, open_shop, parse_command, render_help, render_quest, render_stats, rest,
};
use player::Player;
use save::{MemoryStore, SAVE_VERSION, SaveData, SaveError, SaveStore};
use world::World;

pub use world::{default_world, load_world_from_file, load_world_from_str};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Save silently after every state-changing command, and on quit.
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { auto_save: true }
    }
}

pub struct GameState {
    pub world: World,
    pub player: Player,
    /// Enemy currently being fought, carried across `fight` commands.
    pub encounter: Option<Encounter>,
    pub game_day: u32,
    pub streak: u32,
    pub settings: Settings,
    /// Seconds played in earlier sessions.
    play_time: u64,
    session_started: DateTime<Utc>,
    last_play_date: Option<NaiveDate>,
    store: Box<dyn SaveStore>,
    rng: StdRng,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
    }

    impl From<(Output, bool)> for WasmStepResult {
        fn from((out, quit): (Output, bool)) -> Self {
            WasmStepResult {
                blocks: out.blocks,
                quit,
            }
        }
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string. Call `init()` to get the welcome output.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
                initialized: false,
            })
        }

        /// A game over the built-in world.
        #[wasm_bindgen(js_name = withDefaultWorld)]
        pub fn with_default_world() -> Result<WasmGame, JsValue> {
            let world = default_world().map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
                initialized: false,
            })
        }

        /// Start the session. `today` is `YYYY-MM-DD`; anything else means today in UTC.
        #[wasm_bindgen]
        pub fn init(&mut self, today: &str) -> JsValue {
            self.initialized = true;
            let today = NaiveDate::parse_from_str(today, DATE_FORMAT)
                .unwrap_or_else(|_| Utc::now().date_naive());
            let out = self.state.start(today);
            to_value(&WasmStepResult::from((out, false))).unwrap_or(JsValue::NULL)
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init("");
            }
            to_value(&WasmStepResult::from(self.state.step(input))).unwrap_or(JsValue::NULL)
        }

        /// The current snapshot as JSON, for the host to persist.
        #[wasm_bindgen(js_name = exportSave)]
        pub fn export_save(&self) -> Option<String> {
            self.state.snapshot().encode().ok()
        }

        /// Load a snapshot previously returned by `exportSave`.
        #[wasm_bindgen(js_name = importSave)]
        pub fn import_save(&mut self, payload: &str) -> JsValue {
            let mut out = Output::new();
            self.state.load_payload(&mut out, payload);
            to_value(&WasmStepResult::from((out, false))).unwrap_or(JsValue::NULL)
        }
    }
}

fn fresh_player(world: &World) -> Player {
    let location = world
        .start_location()
        .map(|l| l.name.as_str())
        .unwrap_or(world.start_location.as_str());
    Player::new(location, &world.start_area)
}

impl GameState {
    /// New session with an in-memory save store and an entropy-seeded RNG.
    pub fn new(world: World) -> Self {
        let player = fresh_player(&world);
        GameState {
            world,
            player,
            encounter: None,
            game_day: 1,
            streak: 0,
            settings: Settings::default(),
            play_time: 0,
            session_started: Utc::now(),
            last_play_date: None,
            store: Box::new(MemoryStore::new()),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_store(mut self, store: impl SaveStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Reproducible randomness.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Total seconds played, including the running session.
    pub fn play_time(&self) -> u64 {
        let session = (Utc::now() - self.session_started).num_seconds().max(0) as u64;
        self.play_time + session
    }

    pub fn last_play_date(&self) -> Option<NaiveDate> {
        self.last_play_date
    }

    /// Welcome output. Resumes a stored game if there is one, then updates the daily streak.
    pub fn start(&mut self, today: NaiveDate) -> Output {
        let mut out = Output::new();
        out.title(format!("Welcome to {}!", self.world.name));
        out.say(self.world.desc.trim());

        match self.store.read() {
            Ok(Some(payload)) => {
                self.load_payload(&mut out, &payload);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not read save"),
        }

        self.update_streak(&mut out, today);
        out.say("Type 'help' for a list of commands.");
        out
    }

    fn update_streak(&mut self, out: &mut Output, today: NaiveDate) {
        match self.last_play_date {
            Some(last) => {
                let gap = (today - last).num_days();
                if gap == 1 {
                    self.streak += 1;
                    out.xp(format!("{} day streak!", self.streak));
                } else if gap > 1 {
                    self.streak = 1;
                    out.say("New streak started!");
                }
            }
            None => self.streak = 1,
        }
        self.last_play_date = Some(today);
    }

    /// Process a single player input; returns (output, quit?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        let mut quit = false;

        let command = parse_command(input);
        if !matches!(command, Command::Empty | Command::Unknown(_)) {
            self.player.stats.commands_issued += 1;
        }
        let changes_state = matches!(
            command,
            Command::Fight(_)
                | Command::Explore(_)
                | Command::Heal(_)
                | Command::Rest
                | Command::Buy(_)
                | Command::Use(_)
                | Command::Equip(_)
        );

        match command {
            Command::Empty => {}
            Command::Fight(target) => {
                handle_fight(
                    &mut out,
                    &self.world,
                    &mut self.player,
                    &mut self.encounter,
                    &target,
                    &mut self.rng,
                );
            }
            Command::Explore(area) => {
                handle_explore(&mut out, &self.world, &mut self.player, &area, &mut self.rng);
            }
            Command::Heal(arg) => {
                handle_heal(&mut out, &mut self.player, &arg, &mut self.game_day);
            }
            Command::Rest => {
                rest(&mut out, &mut self.player, &mut self.game_day);
            }
            Command::Inventory => handle_inventory(&mut out, &self.player),
            Command::Stats => {
                self.player.stats.play_time = self.play_time();
                render_stats(
                    &mut out,
                    &self.player,
                    self.game_day,
                    self.streak,
                    self.player.stats.play_time,
                );
            }
            Command::Quest => render_quest(&mut out, &self.player),
            Command::Shop => open_shop(&mut out, &self.world, &self.player),
            Command::Buy(index) => {
                buy(&mut out, &self.world, &mut self.player, &index);
            }
            Command::Use(item) | Command::Equip(item) => {
                handle_use(&mut out, &self.world, &mut self.player, &item);
            }
            Command::Help => render_help(&mut out),
            Command::Save => {
                self.save(&mut out);
            }
            Command::Load => {
                self.load(&mut out);
            }
            Command::Reset => self.reset(&mut out),
            Command::Clear => out.clear(),
            Command::Quit => {
                if self.settings.auto_save {
                    self.save(&mut out);
                }
                out.say("Farewell, Commander.");
                quit = true;
            }
            Command::Unknown(verb) => {
                out.warn(format!(
                    "Command '{}' not understood. Type 'help' for available commands.",
                    verb
                ));
            }
        }

        if changes_state && self.settings.auto_save {
            self.auto_save();
        }

        (out, quit)
    }

    pub fn snapshot(&self) -> SaveData {
        let mut player = self.player.clone();
        player.stats.play_time = self.play_time();
        SaveData {
            player,
            game_day: self.game_day,
            streak: self.streak,
            play_time: self.play_time(),
            last_play_date: self
                .last_play_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            timestamp: Utc::now().timestamp_millis(),
            version: SAVE_VERSION.to_string(),
        }
    }

    fn write_snapshot(&mut self) -> Result<(), SaveError> {
        let payload = self.snapshot().encode()?;
        self.store.write(&payload)
    }

    fn auto_save(&mut self) {
        if let Err(e) = self.write_snapshot() {
            warn!(error = %e, "auto-save failed");
        }
    }

    pub fn save(&mut self, out: &mut Output) -> bool {
        match self.write_snapshot() {
            Ok(()) => {
                info!(day = self.game_day, "game saved");
                out.say("Game saved successfully!");
                true
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                out.warn(format!("Failed to save game: {}", e));
                false
            }
        }
    }

    /// Replaces the session with the stored snapshot. On any failure the
    /// current state is left untouched.
    pub fn load(&mut self, out: &mut Output) -> bool {
        let payload = match self.store.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                out.warn(SaveError::NotFound.to_string());
                return false;
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                out.warn(format!("Failed to load game: {}", e));
                return false;
            }
        };
        self.load_payload(out, &payload)
    }

    pub fn load_payload(&mut self, out: &mut Output, payload: &str) -> bool {
        let data = match SaveData::decode(payload) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "load failed");
                out.warn(format!("Failed to load game: {}", e));
                return false;
            }
        };

        if !data.is_current_version() {
            warn!(found = %data.version, expected = SAVE_VERSION, "save version mismatch");
            out.warn("Save file from a different version");
            out.warn("Some data may not load correctly");
        }

        let mut player = data.player;
        player.normalize();
        self.player = player;
        self.game_day = data.game_day.max(1);
        self.streak = data.streak;
        self.play_time = data.play_time;
        self.session_started = Utc::now();
        self.last_play_date = data
            .last_play_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
        self.encounter = None;

        info!(day = self.game_day, level = self.player.level, "game loaded");
        out.say("Game loaded successfully!");
        out.say(format!(
            "Last played: {}",
            data.last_play_date.as_deref().unwrap_or("Unknown")
        ));
        true
    }

    /// Fresh character on day one; the stored save is removed.
    pub fn reset(&mut self, out: &mut Output) {
        self.player = fresh_player(&self.world);
        self.encounter = None;
        self.game_day = 1;
        self.streak = 0;
        self.play_time = 0;
        self.session_started = Utc::now();

        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not remove save");
            out.warn(format!("Failed to remove saved game: {}", e));
        }
        info!("game reset");
        out.clear();
        out.title("A new adventure begins!");
        out.say(format!(
            "You stand in the {} of {}.",
            self.player.area, self.player.location
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameState {
        GameState::new(default_world().unwrap()).with_seed(99)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn first_start_sets_streak_to_one() {
        let mut g = game();
        g.start(day("2024-05-01"));
        assert_eq!(g.streak, 1);
        assert_eq!(g.last_play_date(), Some(day("2024-05-01")));
    }

    #[test]
    fn streak_rules() {
        let mut g = game();
        let mut out = Output::new();
        g.update_streak(&mut out, day("2024-05-01"));
        g.update_streak(&mut out, day("2024-05-02"));
        assert_eq!(g.streak, 2);
        g.update_streak(&mut out, day("2024-05-02"));
        assert_eq!(g.streak, 2);
        g.update_streak(&mut out, day("2024-05-05"));
        assert_eq!(g.streak, 1);
    }

    #[test]
    fn unknown_command_changes_nothing() {
        let mut g = game();
        let before = g.player.clone();
        let (out, quit) = g.step("dance");
        assert!(!quit);
        assert!(out.contains("not understood"));
        assert_eq!(g.player, before);
    }

    #[test]
    fn commands_are_counted() {
        let mut g = game();
        g.step("stats");
        g.step("quest");
        assert_eq!(g.player.stats.commands_issued, 2);
    }

    #[test]
    fn quit_auto_saves() {
        let mut g = game();
        let (out, quit) = g.step("quit");
        assert!(quit);
        assert!(out.contains("saved"));
        assert!(g.store.read().unwrap().is_some());
    }

    #[test]
    fn purchases_are_auto_saved_quietly() {
        let mut g = game();
        let (out, _) = g.step("buy 1");
        assert!(!out.contains("saved"));
        let payload = g.store.read().unwrap().unwrap();
        assert_eq!(SaveData::decode(&payload).unwrap().player.gold, 1200);
    }

    #[test]
    fn looking_around_does_not_save() {
        let mut g = game();
        g.step("stats");
        g.step("inventory");
        assert!(g.store.read().unwrap().is_none());
    }

    #[test]
    fn bare_potion_rests() {
        let mut g = game();
        g.player.health.set(50);
        let (out, _) = g.step("potion");
        assert!(out.contains("You rest"));
        assert_eq!(g.game_day, 2);
        assert_eq!(g.player.equipment.potion.count, 3);
    }

    #[test]
    fn quit_without_auto_save() {
        let mut g = game().with_settings(Settings { auto_save: false });
        g.step("buy 1");
        g.step("exit");
        assert!(g.store.read().unwrap().is_none());
    }

    #[test]
    fn corrupt_save_leaves_state_intact() {
        let mut g = game().with_store(MemoryStore::with_payload("{\"player\": 3"));
        g.player.gold = 7;
        let (out, _) = g.step("load");
        assert!(out.contains("Failed to load"));
        assert_eq!(g.player.gold, 7);
    }

    #[test]
    fn load_without_save_reports_it() {
        let mut g = game();
        let (out, _) = g.step("load");
        assert!(out.contains("No saved game"));
    }
}
