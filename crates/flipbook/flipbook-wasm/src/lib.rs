use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use flipbook_core::{
    parse_library_json, parse_sequence_json, Advance, EventBuffer, EventRecord, ImageSlot,
    PlayerCommand, PlayerConfig, RenderTarget, SequenceLibrary, SpritePlayer,
};

/// Sequence library plus any number of players, addressed by numeric id.
/// Images are opaque strings (URLs, atlas keys) owned by the JS side.
#[wasm_bindgen]
pub struct Flipbook {
    library: SequenceLibrary<String>,
    players: Vec<Option<WebPlayer>>,
}

struct WebPlayer {
    player: SpritePlayer<ImageSlot<String>>,
    events: EventBuffer<String>,
}

/// Result of `tick`/`advance_frame`, serialized to a plain JS object.
#[derive(Serialize)]
struct TickReport {
    outcome: Option<Advance>,
    image: Option<String>,
    events: Vec<EventRecord<String>>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Accept either a JSON string or a JS object.
fn json_text(value: &JsValue, what: &str) -> Result<String, JsError> {
    if jsvalue_is_undefined_or_null(value) {
        return Err(JsError::new(&format!("{what}: json is null/undefined")));
    }
    if let Some(s) = value.as_string() {
        return Ok(s);
    }
    JSON::stringify(value)
        .map_err(|e| JsError::new(&format!("{what} stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new(&format!("{what}: stringify produced non-string")))
}

fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

impl Flipbook {
    fn player_mut(&mut self, id: u32) -> Result<&mut WebPlayer, JsError> {
        self.players
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| JsError::new(&format!("unknown player id {id}")))
    }

    fn report(&mut self, id: u32, outcome: Option<Advance>) -> Result<JsValue, JsError> {
        let web = self.player_mut(id)?;
        let report = TickReport {
            outcome,
            image: web.player.target().image().cloned(),
            events: web.events.drain(),
        };
        to_js(&report, "tick report")
    }
}

#[wasm_bindgen]
impl Flipbook {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Flipbook {
        console_error_panic_hook::set_once();
        Flipbook {
            library: SequenceLibrary::new(),
            players: Vec::new(),
        }
    }

    /// Load one stored sequence (JSON string or object). Replaces a sequence
    /// of the same name. Returns the sequence name.
    #[wasm_bindgen(js_name = load_sequence)]
    pub fn load_sequence(&mut self, json: JsValue) -> Result<String, JsError> {
        let text = json_text(&json, "load_sequence")?;
        let sequence = parse_sequence_json(&text)
            .map_err(|e| JsError::new(&format!("load_sequence parse error: {e}")))?;
        let name = sequence.name().to_string();
        self.library.insert_or_replace(sequence);
        Ok(name)
    }

    /// Load an array of stored sequences. Returns how many were loaded.
    #[wasm_bindgen(js_name = load_library)]
    pub fn load_library(&mut self, json: JsValue) -> Result<u32, JsError> {
        let text = json_text(&json, "load_library")?;
        let loaded = parse_library_json(&text)
            .map_err(|e| JsError::new(&format!("load_library parse error: {e}")))?;
        let count = loaded.len() as u32;
        for sequence in loaded.iter() {
            self.library.insert_or_replace(sequence.new_instance());
        }
        Ok(count)
    }

    #[wasm_bindgen(js_name = sequence_names)]
    pub fn sequence_names(&self) -> Vec<String> {
        self.library.names().map(str::to_string).collect()
    }

    /// Create a player. `config` is optional JSON matching PlayerConfig;
    /// `idle_image` is shown whenever nothing is playing. Returns the player id.
    #[wasm_bindgen(js_name = create_player)]
    pub fn create_player(
        &mut self,
        config: JsValue,
        idle_image: Option<String>,
    ) -> Result<u32, JsError> {
        let cfg: PlayerConfig = if jsvalue_is_undefined_or_null(&config) {
            PlayerConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let mut player = SpritePlayer::new(ImageSlot::new(idle_image), cfg)
            .map_err(|e| JsError::new(&format!("create_player error: {e}")))?;
        let events = EventBuffer::new();
        player.subscribe(events.clone());

        let web = WebPlayer { player, events };
        let slot = self.players.iter().position(Option::is_none);
        let id = match slot {
            Some(index) => {
                self.players[index] = Some(web);
                index
            }
            None => {
                self.players.push(Some(web));
                self.players.len() - 1
            }
        };
        Ok(id as u32)
    }

    #[wasm_bindgen(js_name = remove_player)]
    pub fn remove_player(&mut self, id: u32) -> bool {
        self.players
            .get_mut(id as usize)
            .and_then(Option::take)
            .is_some()
    }

    /// Apply a PlayerCommand JSON object, e.g. `{ type: "play", sequence: "walk" }`.
    /// `now` is the host time in seconds (same clock as `tick`); frames the
    /// command delivers right away are timed from it.
    /// Returns false when the named sequence is not loaded.
    #[wasm_bindgen]
    pub fn apply(
        &mut self,
        player: u32,
        command: JsValue,
        now: Option<f64>,
    ) -> Result<bool, JsError> {
        let command: PlayerCommand =
            swb::from_value(command).map_err(|e| JsError::new(&format!("command error: {e}")))?;
        let Self { library, players } = self;
        let web = players
            .get_mut(player as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| JsError::new(&format!("unknown player id {player}")))?;
        if let Some(now) = now {
            web.player.set_clock(now);
        }
        web.player
            .apply(&command, library)
            .map_err(|e| JsError::new(&format!("command rejected: {e}")))
    }

    /// Tick a player at `now` seconds. Returns `{ outcome, image, events }`
    /// where `outcome` is "played", "not_playing" or null.
    #[wasm_bindgen]
    pub fn tick(&mut self, player: u32, now: f64) -> Result<JsValue, JsError> {
        let outcome = self.player_mut(player)?.player.tick(now);
        self.report(player, outcome)
    }

    /// Deliver the next frame right away, ignoring the frame interval.
    #[wasm_bindgen(js_name = advance_frame)]
    pub fn advance_frame(&mut self, player: u32) -> Result<JsValue, JsError> {
        let outcome = self.player_mut(player)?.player.advance_frame();
        self.report(player, Some(outcome))
    }

    /// Image currently shown by a player.
    #[wasm_bindgen]
    pub fn image(&mut self, player: u32) -> Result<Option<String>, JsError> {
        Ok(self.player_mut(player)?.player.target().image().cloned())
    }
}

impl Default for Flipbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
