/// The three JSON endpoints the demo reads. Provided to views as a
/// composition local.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Collection of authors (`[{ "id": .., "name": .. }, ..]`).
    pub authors: String,
    /// One post (`{ "title": .., "body": .. }`).
    pub post: String,
    /// Any JSON, shown raw by the root view.
    pub lifecycle: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authors: "https://jsonplaceholder.typicode.com/users".to_string(),
            post: "https://jsonplaceholder.typicode.com/posts/1".to_string(),
            lifecycle: "https://pokeapi.co/api/v2/pokemon".to_string(),
        }
    }
}

impl Endpoints {
    pub fn authors(mut self, url: impl Into<String>) -> Self {
        self.authors = url.into();
        self
    }

    pub fn post(mut self, url: impl Into<String>) -> Self {
        self.post = url.into();
        self
    }

    pub fn lifecycle(mut self, url: impl Into<String>) -> Self {
        self.lifecycle = url.into();
        self
    }
}
