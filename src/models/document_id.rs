use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer};

// Ids arrive as plain strings, native ObjectIds or extended-JSON `{"$oid": ..}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentId {
    String(String),
    ObjectId(ObjectId),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl DocumentId {
    fn into_string(self) -> String {
        match self {
            DocumentId::String(s) => s,
            DocumentId::ObjectId(oid) => oid.to_hex(),
            DocumentId::Extended { oid } => oid,
        }
    }
}

/// Deserializes a document `_id` into the opaque string id used by the core.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    DocumentId::deserialize(deserializer).map(DocumentId::into_string)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Doc {
        #[serde(rename = "_id", deserialize_with = "super::deserialize")]
        id: String,
    }

    #[test]
    fn accepts_plain_string_ids() {
        let doc: Doc = serde_json::from_str(r#"{"_id": "team-7"}"#).unwrap();
        assert_eq!(doc.id, "team-7");
    }

    #[test]
    fn accepts_extended_json_object_ids() {
        let doc: Doc =
            serde_json::from_str(r#"{"_id": {"$oid": "65a1f0c2e4b0a1b2c3d4e5f6"}}"#).unwrap();
        assert_eq!(doc.id, "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn accepts_native_object_ids() {
        let oid = mongodb::bson::oid::ObjectId::new();
        let raw = mongodb::bson::doc! { "_id": oid };
        let doc: Doc = mongodb::bson::from_document(raw).unwrap();
        assert_eq!(doc.id, oid.to_hex());
    }
}
