use crate::errors::ValidationError;
use crate::records::{find_mut, new_id, require, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A vocabulary entry, kept in one global list and tagged with the day it was learned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Word {
    pub id: String,
    pub term: String,
    pub meaning: String,
    #[serde(default)]
    pub example: String,
    pub date: NaiveDate,
}

impl Record for Word {
    const KIND: &'static str = "word";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WordForm {
    pub term: String,
    pub meaning: String,
    pub example: String,
}

impl WordForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("term", &self.term)?;
        require("meaning", &self.meaning)
    }
}

#[derive(Debug, Serialize)]
pub struct VocabularySummary {
    pub date: String,
    pub words: Vec<Word>,
    pub today_count: usize,
    pub total_count: usize,
}

pub fn add(words: &mut Vec<Word>, form: WordForm, date: NaiveDate) -> Result<Word, ValidationError> {
    form.validate()?;
    let word = Word {
        id: new_id(),
        term: form.term.trim().to_string(),
        meaning: form.meaning.trim().to_string(),
        example: form.example.trim().to_string(),
        date,
    };
    words.push(word.clone());
    Ok(word)
}

/// Rewrites the text of a word; the day it was learned stays put.
pub fn edit(words: &mut [Word], id: &str, form: WordForm) -> Result<Word, ValidationError> {
    let word = find_mut(words, id)?;
    form.validate()?;
    word.term = form.term.trim().to_string();
    word.meaning = form.meaning.trim().to_string();
    word.example = form.example.trim().to_string();
    Ok(word.clone())
}

pub fn words_for(words: &[Word], date: NaiveDate) -> Vec<Word> {
    words.iter().filter(|w| w.date == date).cloned().collect()
}

pub fn count_for(words: &[Word], date: NaiveDate) -> usize {
    words.iter().filter(|w| w.date == date).count()
}

/// Case-insensitive match across every day; an empty query falls back to `date`.
pub fn search(words: &[Word], query: &str, date: NaiveDate) -> Vec<Word> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return words_for(words, date);
    }
    words
        .iter()
        .filter(|w| {
            [&w.term, &w.meaning, &w.example]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

pub fn summarize(date: NaiveDate, words: &[Word], query: &str) -> VocabularySummary {
    VocabularySummary {
        date: crate::date::date_key(date),
        words: search(words, query, date),
        today_count: count_for(words, date),
        total_count: words.len(),
    }
}
