//! Location headers for 201 Created responses: the externally configured base
//! URL joined with the resource's single-entity path.

#[derive(Debug, Clone, Copy)]
pub enum ResourcePath {
    Todo,
    Tag,
}

impl ResourcePath {
    fn segment(self) -> &'static str {
        match self {
            ResourcePath::Todo => "todos",
            ResourcePath::Tag => "tags",
        }
    }
}

pub fn created(base_url: &str, path: ResourcePath, id: i64) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), path.segment(), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_location() {
        assert_eq!(
            created("http://localhost:8080", ResourcePath::Tag, 7),
            "http://localhost:8080/tags/7"
        );
        assert_eq!(
            created("http://localhost:8080/", ResourcePath::Todo, 12),
            "http://localhost:8080/todos/12"
        );
    }
}
