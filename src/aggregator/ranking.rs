use indexmap::IndexMap;

use crate::records::RawRepo;
use crate::snapshot::{LanguageCount, RepoSummary};

pub const MAX_LANGUAGES: usize = 6;
pub const MAX_TOP_REPOS: usize = 5;

/// Repos per primary language, most common first.
///
/// `IndexMap` keeps first-seen order and `sort_by` is stable, so ties resolve
/// to the language that appeared first in `repos`.
pub fn rank_languages(repos: &[RawRepo]) -> Vec<LanguageCount> {
    let tally = repos
        .iter()
        .filter_map(|repo| repo.language.as_deref())
        .fold(IndexMap::<&str, usize>::new(), |mut acc, lang| {
            *acc.entry(lang).or_insert(0) += 1;
            acc
        });

    let mut ranked: Vec<(&str, usize)> = tally.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_LANGUAGES)
        .map(|(lang, count)| LanguageCount {
            lang: lang.to_string(),
            count,
        })
        .collect()
}

pub fn rank_top_repos(repos: &[RawRepo]) -> Vec<RepoSummary> {
    let mut by_stars: Vec<&RawRepo> = repos.iter().collect();
    by_stars.sort_by(|a, b| b.stars.cmp(&a.stars));

    by_stars
        .into_iter()
        .take(MAX_TOP_REPOS)
        .map(|repo| RepoSummary {
            name: repo.name.clone(),
            stars: repo.stars,
            forks: repo.forks,
            language: repo.language.clone(),
            url: repo.html_url.clone(),
            updated_at: repo.updated_at,
        })
        .collect()
}
