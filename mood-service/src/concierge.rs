use mood_flow::{ChatMessage, FlowError, FlowRunner};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    catalog::{Catalog, language_option, mood_preset},
    config::Config,
    error::{ConciergeError, Result},
    favorites::FavoriteSet,
    models::{LanguageOption, Movie},
    tasks::session_keys,
    workflow::{Dependencies, create_flow_runner},
};

/// One conversation: a mood, the movies picked for it, the chat about them
/// and the user's favorites. Starting over means creating a new concierge.
pub struct MoodConcierge {
    runner: FlowRunner,
    catalog: Arc<Catalog>,
    favorites: FavoriteSet,
    language: &'static LanguageOption,
}

impl MoodConcierge {
    pub async fn new(config: Config, deps: Dependencies) -> Result<Self> {
        config.validate()?;
        let language = language_option(&config.language)
            .ok_or_else(|| ConciergeError::Config(format!("unknown language code '{}'", config.language)))?;

        let runner = create_flow_runner(&config, &deps).await;
        Ok(Self {
            runner,
            catalog: deps.catalog,
            favorites: FavoriteSet::new(),
            language,
        })
    }

    pub fn session_id(&self) -> &str {
        self.runner.session_id()
    }

    pub fn language(&self) -> &'static LanguageOption {
        self.language
    }

    /// `true` while recommendations are loading or a reply is being written
    pub fn is_pending(&self) -> bool {
        self.runner.is_pending()
    }

    pub fn mood(&self) -> Option<String> {
        self.runner.context().get_sync(session_keys::MOOD)
    }

    pub fn has_recommendations(&self) -> bool {
        self.runner
            .context()
            .contains_key(session_keys::RECOMMENDATIONS)
    }

    /// Submit the mood text. Blank text is ignored and returns `None`.
    pub async fn submit_mood(&self, mood: &str) -> Result<Option<Vec<Movie>>> {
        if mood.trim().is_empty() {
            debug!("Ignoring blank mood submission");
            return Ok(None);
        }
        self.ensure_idle()?;
        if self.has_recommendations() {
            return Err(ConciergeError::MoodAlreadyChosen);
        }

        self.runner
            .run_with_input(session_keys::MOOD, mood)
            .await?;

        info!(session_id = %self.session_id(), "Mood submitted");
        Ok(Some(self.recommendations()))
    }

    /// Submit one of the quick-pick moods by label
    pub async fn submit_preset(&self, label: &str) -> Result<Option<Vec<Movie>>> {
        let preset =
            mood_preset(label).ok_or_else(|| ConciergeError::UnknownPreset(label.to_string()))?;
        self.submit_mood(preset.mood).await
    }

    /// Send a chat message and wait for the reply. Blank text is ignored and
    /// returns `None` without touching the transcript.
    pub async fn send_message(&self, text: &str) -> Result<Option<String>> {
        if text.trim().is_empty() {
            debug!("Ignoring blank chat message");
            return Ok(None);
        }
        self.ensure_idle()?;
        if !self.has_recommendations() {
            return Err(ConciergeError::MoodNotChosen);
        }

        let result = self
            .runner
            .run_with_input(session_keys::USER_INPUT, text)
            .await?;
        Ok(result.response)
    }

    /// Current recommendations with their favorite flag filled in
    pub fn recommendations(&self) -> Vec<Movie> {
        let movies: Vec<Movie> = self
            .runner
            .context()
            .get_sync(session_keys::RECOMMENDATIONS)
            .unwrap_or_default();

        movies
            .into_iter()
            .map(|mut movie| {
                movie.is_favorite = Some(self.favorites.contains(movie.id));
                movie
            })
            .collect()
    }

    /// Flip the favorite flag of a catalog movie; returns the new state
    pub fn toggle_favorite(&self, id: u32) -> Result<bool> {
        if self.catalog.find(id).is_none() {
            return Err(ConciergeError::UnknownMovie(id));
        }
        let favorite = self.favorites.toggle(id);
        debug!(movie_id = id, favorite, "Favorite toggled");
        Ok(favorite)
    }

    /// Favorite movies in id order
    pub fn favorites(&self) -> Vec<Movie> {
        self.favorites
            .ids()
            .into_iter()
            .filter_map(|id| self.catalog.find(id).cloned())
            .map(|mut movie| {
                movie.is_favorite = Some(true);
                movie
            })
            .collect()
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.runner.context().get_all_messages().await
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.runner.is_pending() {
            return Err(FlowError::Busy(self.session_id().to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chat::{APOLOGY_REPLY, FAMILY_FOUND_REPLY, GENERIC_REPLIES},
        delay::{InstantDelay, TokioDelay},
        random::FixedRandom,
        tasks::ReplyEngine,
    };
    use async_trait::async_trait;
    use mood_flow::MessageRole;
    use std::time::Duration;

    struct BrokenEngine;

    #[async_trait]
    impl ReplyEngine for BrokenEngine {
        async fn reply(&self, _message: &str, _recommendations: &[Movie]) -> anyhow::Result<String> {
            anyhow::bail!("engine offline")
        }
    }

    fn instant_deps() -> (Dependencies, Arc<InstantDelay>) {
        let delay = Arc::new(InstantDelay::new());
        let deps = Dependencies::default()
            .with_delay(delay.clone())
            .with_random(Arc::new(FixedRandom::new(1)));
        (deps, delay)
    }

    async fn concierge() -> MoodConcierge {
        let (deps, _) = instant_deps();
        MoodConcierge::new(Config::default(), deps).await.unwrap()
    }

    fn ids(movies: &[Movie]) -> Vec<u32> {
        movies.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn test_mood_then_chat() {
        let (deps, delay) = instant_deps();
        let concierge = MoodConcierge::new(Config::default(), deps).await.unwrap();

        let movies = concierge.submit_mood("So much STRESS lately").await.unwrap().unwrap();
        assert_eq!(ids(&movies), vec![5]);
        assert_eq!(concierge.mood().as_deref(), Some("So much STRESS lately"));

        let reply = concierge.send_message("Can my kids watch it?").await.unwrap().unwrap();
        assert_eq!(reply, FAMILY_FOUND_REPLY.replace("{title}", "Studio Ghibli Collection"));

        let reply = concierge.send_message("tell me a joke").await.unwrap().unwrap();
        assert_eq!(reply, GENERIC_REPLIES[1]);

        let transcript = concierge.transcript().await;
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[0].role, MessageRole::Assistant);
        assert!(transcript[0].text.contains("\"So much STRESS lately\""));
        assert_eq!(
            transcript.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        // loading delay, then one thinking delay per reply
        let requested = delay.requested();
        assert_eq!(requested[0], Duration::from_millis(1500));
        assert_eq!(requested.len(), 3);
        assert!(requested[1..].iter().all(|d| *d >= Duration::from_millis(1000)
            && *d < Duration::from_millis(2000)));
    }

    #[tokio::test]
    async fn test_blank_submissions_are_ignored() {
        let concierge = concierge().await;

        assert!(concierge.submit_mood("   ").await.unwrap().is_none());
        assert!(!concierge.has_recommendations());
        assert!(concierge.mood().is_none());

        concierge.submit_mood("meh").await.unwrap();
        assert_eq!(concierge.transcript().await.len(), 1);

        assert!(concierge.send_message("").await.unwrap().is_none());
        assert!(concierge.send_message(" \t\n").await.unwrap().is_none());
        assert_eq!(concierge.transcript().await.len(), 1);
    }

    #[tokio::test]
    async fn test_stage_rules() {
        let concierge = concierge().await;

        assert!(matches!(
            concierge.send_message("hello").await,
            Err(ConciergeError::MoodNotChosen)
        ));
        assert!(concierge.transcript().await.is_empty());

        let movies = concierge.submit_mood("whatever").await.unwrap().unwrap();
        assert_eq!(ids(&movies), vec![3, 4, 1]);

        assert!(matches!(
            concierge.submit_mood("actually sad").await,
            Err(ConciergeError::MoodAlreadyChosen)
        ));
        assert_eq!(ids(&concierge.recommendations()), vec![3, 4, 1]);
    }

    #[tokio::test]
    async fn test_presets() {
        let concierge = concierge().await;
        assert!(matches!(
            concierge.submit_preset("Grumpy").await,
            Err(ConciergeError::UnknownPreset(_))
        ));

        let movies = concierge.submit_preset("energetic").await.unwrap().unwrap();
        assert_eq!(ids(&movies), vec![3, 4, 1]);
    }

    #[tokio::test]
    async fn test_favorites() {
        let concierge = concierge().await;
        concierge.submit_mood("happy!").await.unwrap();

        assert!(concierge.toggle_favorite(4).unwrap());
        assert!(concierge.toggle_favorite(6).unwrap());
        assert!(matches!(
            concierge.toggle_favorite(99),
            Err(ConciergeError::UnknownMovie(99))
        ));

        let flags: Vec<(u32, Option<bool>)> = concierge
            .recommendations()
            .iter()
            .map(|m| (m.id, m.is_favorite))
            .collect();
        assert_eq!(flags, vec![(3, Some(false)), (4, Some(true))]);
        assert_eq!(ids(&concierge.favorites()), vec![4, 6]);

        assert!(!concierge.toggle_favorite(4).unwrap());
        assert_eq!(ids(&concierge.favorites()), vec![6]);
    }

    #[tokio::test]
    async fn test_reply_failure_becomes_apology() {
        let (deps, _) = instant_deps();
        let deps = deps.with_reply_engine(Arc::new(BrokenEngine));
        let concierge = MoodConcierge::new(Config::default(), deps).await.unwrap();
        concierge.submit_mood("sad").await.unwrap();

        let reply = concierge.send_message("anything for kids?").await.unwrap();
        assert_eq!(reply.as_deref(), Some(APOLOGY_REPLY));
        assert!(!concierge.is_pending());

        // the conversation carries on
        let reply = concierge.send_message("thanks anyway").await.unwrap();
        assert_eq!(reply.as_deref(), Some(APOLOGY_REPLY));
        assert_eq!(concierge.transcript().await.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submissions_are_rejected_while_reply_is_pending() {
        let deps = Dependencies::default()
            .with_delay(Arc::new(TokioDelay))
            .with_random(Arc::new(FixedRandom::new(0)));
        let concierge = Arc::new(MoodConcierge::new(Config::default(), deps).await.unwrap());
        concierge.submit_mood("feeling down").await.unwrap();

        let pending = {
            let concierge = concierge.clone();
            tokio::spawn(async move { concierge.send_message("Where can I watch these?").await })
        };
        while !concierge.is_pending() {
            tokio::task::yield_now().await;
        }

        let err = concierge.send_message("hello?").await.unwrap_err();
        assert!(err.is_busy());
        assert!(concierge.submit_mood("happy").await.unwrap_err().is_busy());

        // the user's message is visible while the reply is still being "typed"
        let transcript = concierge.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert!(transcript[1].is_user());

        let reply = pending.await.unwrap().unwrap();
        assert!(reply.is_some());
        assert!(!concierge.is_pending());
        assert_eq!(concierge.transcript().await.len(), 3);
    }

    #[tokio::test]
    async fn test_language_preference() {
        let (deps, _) = instant_deps();
        let concierge = MoodConcierge::new(Config::default().with_language("es"), deps)
            .await
            .unwrap();
        assert_eq!(concierge.language().name, "Spanish");

        let (deps, _) = instant_deps();
        let result = MoodConcierge::new(Config::default().with_language("xx"), deps).await;
        assert!(matches!(result, Err(ConciergeError::Config(_))));
    }
}
