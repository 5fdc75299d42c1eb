//! Text-to-speech handler

use crate::payload::Payload;
use crate::result::DialogResult;
use dialog_core::config::{Config, SpeechEngine};
use dialog_core::process::{Fallback, Invocation};

/// Text to speak and how to speak it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<String>,
    /// Words per minute
    pub rate: u32,
}

impl Utterance {
    /// Build from a payload; `None` when `text` is missing or empty
    pub fn from_payload(payload: &Payload, default_rate: u32) -> Option<Self> {
        let text = payload.non_empty_str("text")?;
        Some(Self {
            text: text.to_string(),
            voice: payload.non_empty_str("voice").map(str::to_string),
            rate: payload.u32("rate").unwrap_or(default_rate),
        })
    }

    /// Command line for one engine: rate flag, optional voice flag, then the text
    pub fn invocation(&self, engine: &SpeechEngine) -> Invocation {
        let mut cmd = Invocation::new(engine.program.as_str())
            .arg(engine.rate_flag.as_str())
            .arg(self.rate.to_string());

        if let Some(voice) = &self.voice {
            cmd = cmd.arg(engine.voice_flag.as_str()).arg(voice.as_str());
        }

        cmd.arg(self.text.as_str())
    }

    /// One candidate per engine, in configured order
    pub fn fallback(&self, engines: &[SpeechEngine]) -> Fallback {
        Fallback::new(engines.iter().map(|e| self.invocation(e)).collect())
    }
}

/// Speak the payload's text with the first engine that succeeds
pub fn handle(payload: &Payload, config: &Config) -> DialogResult {
    let Some(utterance) = Utterance::from_payload(payload, config.speech_rate()) else {
        tracing::debug!("tts without text");
        return DialogResult::failed();
    };

    tracing::debug!(rate = utterance.rate, voice = ?utterance.voice, "speaking");
    utterance.fallback(&config.speech.engines).run().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_core::config::{Defaults, SpeechConfig};

    fn with_engines(engines: Vec<SpeechEngine>) -> Config {
        Config {
            speech: SpeechConfig { engines },
            ..Default::default()
        }
    }

    #[test]
    fn test_rate_defaults() {
        let utterance = Utterance::from_payload(&Payload::parse(r#"{"text":"hello"}"#), 200).unwrap();
        assert_eq!(utterance.rate, 200);
        assert_eq!(utterance.voice, None);

        let config = Config {
            defaults: Defaults {
                speech_rate: Some(240),
                ..Default::default()
            },
            ..Default::default()
        };
        let utterance =
            Utterance::from_payload(&Payload::parse(r#"{"text":"hello"}"#), config.speech_rate())
                .unwrap();
        assert_eq!(utterance.rate, 240);
    }

    #[test]
    fn test_missing_text() {
        assert!(Utterance::from_payload(&Payload::parse("{}"), 200).is_none());
        assert!(Utterance::from_payload(&Payload::parse(r#"{"text":""}"#), 200).is_none());
    }

    #[test]
    fn test_default_engine_arguments() {
        let payload = Payload::parse(r#"{"text":"hello","rate":150,"voice":"Samantha"}"#);
        let utterance = Utterance::from_payload(&payload, 200).unwrap();
        let chain = utterance.fallback(&Config::default().speech.engines);

        let candidates = chain.candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].program, "say");
        assert_eq!(candidates[0].args, vec!["-r", "150", "-v", "Samantha", "hello"]);
        assert_eq!(candidates[1].program, "espeak");
        assert_eq!(candidates[1].args, vec!["-s", "150", "-v", "Samantha", "hello"]);
    }

    #[test]
    fn test_voice_omitted_when_absent() {
        let utterance = Utterance::from_payload(&Payload::parse(r#"{"text":"hi"}"#), 200).unwrap();
        let inv = utterance.invocation(&SpeechEngine::new("espeak", "-s", "-v"));
        assert_eq!(inv.args, vec!["-s", "200", "hi"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_fallback_engine_rescues_failure() {
        let config = with_engines(vec![
            SpeechEngine::new("false", "-r", "-v"),
            SpeechEngine::new("true", "-s", "-v"),
        ]);
        let payload = Payload::parse(r#"{"text":"hello","rate":150}"#);
        assert_eq!(handle(&payload, &config), DialogResult::ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_all_engines_fail() {
        let config = with_engines(vec![
            SpeechEngine::new("/nonexistent/say", "-r", "-v"),
            SpeechEngine::new("false", "-s", "-v"),
        ]);
        let payload = Payload::parse(r#"{"text":"hello"}"#);
        assert_eq!(handle(&payload, &config), DialogResult::failed());
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_text_spawns_nothing() {
        let config = with_engines(vec![SpeechEngine::new("true", "-r", "-v")]);
        assert_eq!(handle(&Payload::parse(r#"{"rate":150}"#), &config), DialogResult::failed());
    }
}
