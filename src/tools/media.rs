//! Mocked music playback tools

use super::{string_arg, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct PlayMusicTool;

#[async_trait]
impl Tool for PlayMusicTool {
    fn name(&self) -> &'static str {
        "play_music"
    }

    fn description(&self) -> String {
        "Starts playing music. Can optionally specify a genre.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "genre": {
                    "type": "string",
                    "description": "The genre of music to play (e.g., 'jazz', 'classical', 'pop'). Optional."
                }
            }
        })
    }

    async fn run(&self, args: &Value, _ctx: &ToolContext) -> String {
        match string_arg(args, "genre") {
            Some(genre) => format!("Certainly, playing some {genre} music for you."),
            None => "Certainly, playing some soothing music for you.".to_string(),
        }
    }
}

pub struct StopMusicTool;

#[async_trait]
impl Tool for StopMusicTool {
    fn name(&self) -> &'static str {
        "stop_music"
    }

    fn description(&self) -> String {
        "Stops any currently playing music.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn run(&self, _args: &Value, _ctx: &ToolContext) -> String {
        "Music stopped.".to_string()
    }
}

pub struct NextSongTool;

#[async_trait]
impl Tool for NextSongTool {
    fn name(&self) -> &'static str {
        "next_song"
    }

    fn description(&self) -> String {
        "Plays the next song in the queue or playlist.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn run(&self, _args: &Value, _ctx: &ToolContext) -> String {
        "Playing the next song.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tests::test_context;

    #[tokio::test]
    async fn play_music_with_and_without_genre() {
        let (_dir, ctx) = test_context();
        let with_genre = PlayMusicTool.run(&json!({ "genre": "jazz" }), &ctx).await;
        assert_eq!(with_genre, "Certainly, playing some jazz music for you.");

        let without = PlayMusicTool.run(&json!({}), &ctx).await;
        assert_eq!(without, "Certainly, playing some soothing music for you.");
    }

    #[tokio::test]
    async fn stop_and_next() {
        let (_dir, ctx) = test_context();
        assert_eq!(StopMusicTool.run(&json!({}), &ctx).await, "Music stopped.");
        assert_eq!(
            NextSongTool.run(&json!({}), &ctx).await,
            "Playing the next song."
        );
    }
}
