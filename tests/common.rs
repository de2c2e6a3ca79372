#![allow(dead_code)]

use jiff::civil::Date;
use sitesearch::SearchRecord;

/// In-memory record for exercising the filter engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    pub title: String,
    pub kind: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub date: Option<Date>,
    pub body: String,
}

impl SearchRecord for Doc {
    fn content_type(&self) -> String {
        self.kind.clone()
    }

    fn category_names(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn tag_names(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn author_name(&self) -> String {
        self.author.clone()
    }

    fn date(&self) -> Option<Date> {
        self.date
    }

    fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

pub fn doc(title: &str, kind: &str) -> Doc {
    Doc {
        title: title.to_string(),
        kind: kind.to_string(),
        categories: Vec::new(),
        tags: Vec::new(),
        author: String::new(),
        date: None,
        body: String::new(),
    }
}

impl Doc {
    pub fn categories(mut self, names: &[&str]) -> Self {
        self.categories = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn tags(mut self, names: &[&str]) -> Self {
        self.tags = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn author(mut self, name: &str) -> Self {
        self.author = name.to_string();
        self
    }

    pub fn date(mut self, year: i16, month: i8, day: i8) -> Self {
        self.date = Some(Date::constant(year, month, day));
        self
    }

    pub fn body(mut self, text: &str) -> Self {
        self.body = text.to_string();
        self
    }
}

pub fn titles(docs: &[Doc]) -> Vec<&str> {
    docs.iter().map(|d| d.title.as_str()).collect()
}
