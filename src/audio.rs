use crate::constants::UI_MASTER_GAIN;
use folio_core::sound::{key_detune_cents, ToneSpec, UiSound, Wave};
use web_sys as web;

/// WebAudio output for the procedural UI sounds.
///
/// The context is created on the first user gesture; until then every
/// sound is dropped silently.
#[derive(Default)]
pub struct UiAudio {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
    muted: bool,
    keys_played: usize,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn oscillator_type(wave: Wave) -> web::OscillatorType {
    match wave {
        Wave::Sine => web::OscillatorType::Sine,
        Wave::Square => web::OscillatorType::Square,
        Wave::Triangle => web::OscillatorType::Triangle,
        Wave::Sawtooth => web::OscillatorType::Sawtooth,
    }
}

impl UiAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or resume the context. Call from inside a gesture handler.
    pub fn unlock(&mut self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web::AudioContextState::Suspended {
                _ = ctx.resume();
            }
            return;
        }
        let ctx = match web::AudioContext::new() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[audio] AudioContext unavailable: {:?}", e);
                return;
            }
        };
        _ = ctx.resume();
        let Ok(master) = create_gain(&ctx, self.master_level(), "Master") else {
            return;
        };
        _ = master.connect_with_audio_node(&ctx.destination());
        self.master = Some(master);
        self.ctx = Some(ctx);
        log::info!("[audio] unlocked");
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if let Some(m) = &self.master {
            m.gain().set_value(self.master_level());
        }
        log::info!("[audio] muted={}", self.muted);
        self.muted
    }

    fn master_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            UI_MASTER_GAIN
        }
    }

    pub fn play(&mut self, sound: UiSound) {
        let mut tone = sound.tone();
        if sound == UiSound::Key {
            tone = tone.detuned(key_detune_cents(self.keys_played));
            self.keys_played = self.keys_played.wrapping_add(1);
        }
        if self.muted {
            return;
        }
        if let (Some(ctx), Some(master)) = (&self.ctx, &self.master) {
            trigger_tone(ctx, master, &tone);
        }
    }
}

// Single oscillator with a pitch sweep and attack/release envelope
fn trigger_tone(audio_ctx: &web::AudioContext, out: &web::GainNode, tone: &ToneSpec) {
    let Ok(src) = web::OscillatorNode::new(audio_ctx) else {
        return;
    };
    src.set_type(oscillator_type(tone.wave));
    let Ok(g) = create_gain(audio_ctx, 0.0, "tone") else {
        return;
    };
    let t0 = audio_ctx.current_time() + 0.005;
    let end = t0 + tone.duration_sec as f64;
    _ = src.frequency().set_value_at_time(tone.freq_start, t0);
    _ = src
        .frequency()
        .exponential_ramp_to_value_at_time(tone.freq_end, end);
    _ = g.gain().set_value_at_time(0.0, t0);
    _ = g
        .gain()
        .linear_ramp_to_value_at_time(tone.gain, t0 + tone.attack_sec as f64);
    _ = g.gain().linear_ramp_to_value_at_time(0.0, end);
    _ = src.connect_with_audio_node(&g);
    _ = g.connect_with_audio_node(out);
    _ = src.start_with_when(t0);
    _ = src.stop_with_when(end + 0.02);
}
