/// A stored spending category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub color: String,
}
