// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Resolves pretrained tokenizers by Hugging Face repo id.
//
// Lookup order:
//   1. {cache_dir}/{repo}/tokenizer.json    (already fetched)
//   2. download tokenizer.json from the hub, copy it into the
//      cache directory, then load it
//
// BERT preprocessing uses "bert-base-uncased"; GPT uses "gpt2".

use anyhow::{anyhow, Context, Result};
use std::{fs, path::PathBuf};
use tokenizers::Tokenizer;

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the cached tokenizer for `repo`, downloading it on a miss
    pub fn load_or_download(&self, repo: &str) -> Result<Tokenizer> {
        let path = self.local_path(repo);
        if path.exists() {
            tracing::info!("Loading tokenizer '{}' from '{}'", repo, path.display());
        } else {
            tracing::info!("Tokenizer '{}' not cached, downloading from the hub", repo);
            self.download(repo)?;
        }
        load(&path)
    }

    fn local_path(&self, repo: &str) -> PathBuf {
        self.dir.join(repo.replace(['/', '\\'], "_")).join(TOKENIZER_FILE)
    }

    fn download(&self, repo: &str) -> Result<PathBuf> {
        let api = hf_hub::api::sync::Api::new().context("hf-hub API")?;
        let fetched = api
            .model(repo.to_string())
            .get(TOKENIZER_FILE)
            .map_err(|e| anyhow!("hub get '{}/{}': {}", repo, TOKENIZER_FILE, e))?;

        let target = self.local_path(repo);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }
        fs::copy(&fetched, &target).with_context(|| {
            format!("Cannot copy '{}' to '{}'", fetched.display(), target.display())
        })?;

        tracing::debug!("Cached tokenizer '{}' at '{}'", repo, target.display());
        Ok(target)
    }
}

/// Load a tokenizer JSON file
pub fn load(path: &std::path::Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path)
        .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_file_is_loaded_without_network() {
        let dir   = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path());

        let path = store.local_path("org/model");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        test_support::word_level_tokenizer()
            .save(&path, false)
            .unwrap();

        let tok = store.load_or_download("org/model").unwrap();
        assert_eq!(tok.token_to_id("[CLS]"), Some(101));
    }

    #[test]
    fn test_repo_ids_are_flattened() {
        let store = TokenizerStore::new("cache");
        assert_eq!(
            store.local_path("openai-community/gpt2"),
            PathBuf::from("cache/openai-community_gpt2/tokenizer.json")
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load(std::path::Path::new("/nonexistent/tokenizer.json")).is_err());
    }
}
