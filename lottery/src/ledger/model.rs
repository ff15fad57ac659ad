use uuid::Uuid;

/// Original imported row, kept in column order so it can be written back on export.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SourceRecord {
    fields: Vec<(String, String)>
}

impl SourceRecord {
    pub fn new() -> SourceRecord {
        SourceRecord { fields: vec![] }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: Vec<(K, V)>) -> SourceRecord {
        pairs.into_iter().fold(SourceRecord::new(), |mut record, (key, value)| {
            record.insert(key, value);
            record
        })
    }

    /// Set a column, keeping its original position when it already exists.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|field| field.0 == key) {
            Some(field) => field.1 = value,
            None => self.fields.push((key, value))
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter()
            .find(|field| field.0 == key)
            .map(|field| field.1.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.0.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn new_id() -> String {
    format!("{}", Uuid::new_v4())
}

/// Name shown on the wheel: the student identifier is appended when known.
pub fn display_name(name: &str, student_id: &str) -> String {
    if student_id.is_empty() {
        name.to_owned()
    } else {
        format!("{} ({})", name, student_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub raw_data: SourceRecord
}

impl Participant {
    pub fn new(name: &str, student_id: &str, raw_data: SourceRecord) -> Participant {
        Participant {
            id: new_id(),
            name: display_name(name, student_id),
            student_id: student_id.to_owned(),
            raw_data
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prize {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub total_quantity: u32
}

impl Prize {
    pub fn new(name: &str, image: &str, quantity: u32) -> Prize {
        Prize {
            id: new_id(),
            name: name.to_owned(),
            image: image.to_owned(),
            quantity,
            total_quantity: quantity
        }
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Exhausted prizes stay listed with a zero quantity.
    pub fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }

    pub fn awarded(&self) -> u32 {
        self.total_quantity - self.quantity
    }
}

/// Snapshot of a participant at the moment they won.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Winner {
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub raw_data: SourceRecord,
    pub prize: String
}

impl Winner {
    pub fn from_participant(participant: Participant, prize: &str) -> Winner {
        Winner {
            id: participant.id,
            name: participant.name,
            student_id: participant.student_id,
            raw_data: participant.raw_data,
            prize: prize.to_owned()
        }
    }
}
