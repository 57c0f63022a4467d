//! Procedural UI sound definitions.
//!
//! Each sound is a single oscillator with a pitch sweep and an
//! attack/release envelope. The web host turns a [`ToneSpec`] into WebAudio
//! nodes; keeping the numbers here lets them be checked without a browser.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiSound {
    Hover,
    Click,
    Open,
    Close,
    Key,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub wave: Wave,
    pub freq_start: f32,
    pub freq_end: f32,
    pub attack_sec: f32,
    pub duration_sec: f32,
    pub gain: f32,
}

impl UiSound {
    pub fn tone(self) -> ToneSpec {
        match self {
            UiSound::Hover => ToneSpec {
                wave: Wave::Sine,
                freq_start: 880.0,
                freq_end: 1320.0,
                attack_sec: 0.005,
                duration_sec: 0.06,
                gain: 0.05,
            },
            UiSound::Click => ToneSpec {
                wave: Wave::Triangle,
                freq_start: 600.0,
                freq_end: 220.0,
                attack_sec: 0.002,
                duration_sec: 0.09,
                gain: 0.12,
            },
            UiSound::Open => ToneSpec {
                wave: Wave::Sine,
                freq_start: 330.0,
                freq_end: 990.0,
                attack_sec: 0.02,
                duration_sec: 0.25,
                gain: 0.1,
            },
            UiSound::Close => ToneSpec {
                wave: Wave::Sine,
                freq_start: 990.0,
                freq_end: 330.0,
                attack_sec: 0.01,
                duration_sec: 0.2,
                gain: 0.1,
            },
            UiSound::Key => ToneSpec {
                wave: Wave::Square,
                freq_start: 1800.0,
                freq_end: 1200.0,
                attack_sec: 0.001,
                duration_sec: 0.025,
                gain: 0.03,
            },
        }
    }
}

impl ToneSpec {
    /// Exponential sweep from `freq_start` to `freq_end` over the duration.
    pub fn freq_at(&self, t_sec: f32) -> f32 {
        let u = (t_sec / self.duration_sec.max(1e-6)).clamp(0.0, 1.0);
        self.freq_start * (self.freq_end / self.freq_start).powf(u)
    }

    /// Linear attack to `gain`, then linear release to silence at the end.
    pub fn envelope_at(&self, t_sec: f32) -> f32 {
        if t_sec <= 0.0 || t_sec >= self.duration_sec {
            return 0.0;
        }
        if t_sec < self.attack_sec {
            return self.gain * t_sec / self.attack_sec.max(1e-6);
        }
        let release = (self.duration_sec - self.attack_sec).max(1e-6);
        self.gain * (1.0 - (t_sec - self.attack_sec) / release)
    }

    /// Same tone shifted by `cents`, used to keep repeated key clicks from
    /// sounding identical.
    pub fn detuned(mut self, cents: f32) -> Self {
        let ratio = 2.0_f32.powf(cents / 1200.0);
        self.freq_start *= ratio;
        self.freq_end *= ratio;
        self
    }
}

/// Deterministic detune pattern for the n-th keystroke, in cents.
#[inline]
pub fn key_detune_cents(n: usize) -> f32 {
    const PATTERN: [f32; 5] = [0.0, 35.0, -20.0, 60.0, -45.0];
    PATTERN[n % PATTERN.len()]
}
