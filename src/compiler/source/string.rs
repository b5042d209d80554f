use super::{HasOrigin, Origin, Source};

#[derive(Debug, Clone)]
pub struct StringSource {
    content: String,
    name: Option<String>,
}

impl StringSource {
    pub fn new<C: Into<String>>(content: C) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    pub fn named<C: Into<String>, N: Into<String>>(content: C, name: N) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }
}

impl HasOrigin for StringSource {
    fn origin(&self) -> Origin {
        match &self.name {
            Some(name) => Origin::Buffer(name.clone()),
            None => Origin::Synthetic,
        }
    }
}

impl Source for StringSource {
    fn read_to_string(&mut self, buf: &mut String) -> std::io::Result<usize> {
        buf.push_str(&self.content);
        Ok(self.content.len())
    }
}
