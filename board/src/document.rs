use serde_json::Value;

/// Ordered collection of drawable objects for one room.
///
/// Objects are opaque JSON values; the only field with meaning here is
/// `id`, which keys create/update/delete matching. Matching is JSON value
/// equality, so the ids `1` and `"1"` name different objects.
#[derive(Debug, Default)]
pub struct Document {
    objects: Vec<Value>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Point-in-time copy handed to clients joining mid-session.
    pub fn snapshot(&self) -> Vec<Value> {
        self.objects.clone()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Appends a new object. A duplicate `id` replaces the existing object
    /// in place instead, so the list never holds the same `id` twice. An
    /// object without an `id` key cannot be matched later and just appends.
    pub fn create(&mut self, object: Value) {
        match self.position_of(object.get("id")) {
            Some(existing) => self.objects[existing] = object,
            None => self.objects.push(object),
        }
    }

    /// Replaces the object with the same `id`, keeping its position.
    /// A miss (object deleted, never created, or payload without `id`) is
    /// silently ignored; late edits against removed objects are expected
    /// traffic, not errors.
    pub fn update(&mut self, object: Value) {
        if let Some(existing) = self.position_of(object.get("id")) {
            self.objects[existing] = object;
        }
    }

    /// Removes the object with this `id`, if present.
    pub fn delete(&mut self, id: &Value) {
        self.objects.retain(|object| object.get("id") != Some(id));
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    fn position_of(&self, id: Option<&Value>) -> Option<usize> {
        let id = id?;
        self.objects
            .iter()
            .position(|object| object.get("id") == Some(id))
    }
}
