use std::collections::HashMap;

/// Run-scoped mutable state shared by BEGIN, the body rule and END.
#[derive(Debug, Clone)]
pub struct Context {
    /// Record number (NR), 0 until the first record is read
    pub record_number: usize,
    /// Current record ($0)
    pub current_line: String,
    /// Current fields ($1, $2, ...)
    pub fields: Vec<String>,
    /// Field separator (FS)
    pub field_separator: String,
    /// User variables, created on first assignment
    pub variables: HashMap<String, f64>,
}

impl Context {
    pub fn new(field_separator: &str) -> Self {
        Self::with_variables(field_separator, HashMap::new())
    }

    pub fn with_variables(field_separator: &str, variables: HashMap<String, f64>) -> Self {
        Self {
            record_number: 0,
            current_line: String::new(),
            fields: Vec::new(),
            field_separator: field_separator.to_string(),
            variables,
        }
    }

    /// Replace the current record and re-split its fields
    pub fn set_record(&mut self, record: &str) {
        self.current_line.clear();
        self.current_line.push_str(record);
        split_fields_into(&self.current_line, &self.field_separator, &mut self.fields);
    }

    /// Field by 1-based index; 0 is the whole record, out of range is ""
    #[inline]
    pub fn field(&self, index: usize) -> &str {
        if index == 0 {
            &self.current_line
        } else {
            self.fields.get(index - 1).map(String::as_str).unwrap_or("")
        }
    }

    /// Variable value; NR and NF are maintained by the interpreter,
    /// anything never assigned reads as 0
    pub fn variable(&self, name: &str) -> f64 {
        match name {
            "NR" => self.record_number as f64,
            "NF" => self.fields.len() as f64,
            _ => self.variables.get(name).copied().unwrap_or(0.0),
        }
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        match self.variables.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.variables.insert(name.to_string(), value);
            }
        }
    }
}

/// Split a record into fields.
///
/// A separator of exactly one space means "runs of whitespace" with leading
/// and trailing blanks dropped. Any other separator is matched literally and
/// empty fields between adjacent separators are kept. An empty separator
/// splits the record into characters.
pub fn split_fields(record: &str, separator: &str) -> Vec<String> {
    let mut fields = Vec::new();
    split_fields_into(record, separator, &mut fields);
    fields
}

fn split_fields_into(record: &str, separator: &str, fields: &mut Vec<String>) {
    fields.clear();

    if separator == " " {
        fields.extend(record.split_whitespace().map(String::from));
    } else if separator.is_empty() {
        fields.extend(record.chars().map(String::from));
    } else if separator.len() == 1 {
        // Single byte separator - most common case, optimize for it
        let sep = separator.as_bytes()[0];
        let mut start = 0;
        for (i, &b) in record.as_bytes().iter().enumerate() {
            if b == sep {
                fields.push(record[start..i].to_string());
                start = i + 1;
            }
        }
        fields.push(record[start..].to_string());
    } else {
        fields.extend(record.split(separator).map(String::from));
    }
}
