use serde::Serialize;
use tokio::sync::RwLock;

/// Ordered field name/value pairs captured from a form at submit time.
/// Serializes as a sequence of pairs, which is what a URL-encoded body needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload(Vec<(String, String)>);

impl FormPayload {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormPayload(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// The input side of a form: its id and the current value of each field.
/// Field order is insertion order and names may repeat.
#[derive(Debug)]
pub struct Form {
    id: String,
    fields: RwLock<Vec<(String, String)>>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: RwLock::new(Vec::new()),
        }
    }

    pub fn with_fields<I, K, V>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: id.into(),
            fields: RwLock::new(
                fields
                    .into_iter()
                    .map(|(name, value)| (name.into(), value.into()))
                    .collect(),
            ),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn add_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.write().await.push((name.into(), value.into()));
    }

    /// Updates the first field called `name`, adding it if absent.
    pub async fn set_value(&self, name: &str, value: impl Into<String>) {
        let mut fields = self.fields.write().await;
        match fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, current)) => *current = value.into(),
            None => fields.push((name.to_string(), value.into())),
        }
    }

    pub async fn serialize(&self) -> FormPayload {
        FormPayload(self.fields.read().await.clone())
    }
}
