use alloc::boxed::Box;
use serde::{Serialize, Serializer};

/// A quiz subject. The four supported subjects map onto the question
/// service's category vocabulary. Anything else is passed through as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    Java,
    JavaScript,
    Cpp,
    Dbms,
    Other(Box<str>),
}

impl Topic {
    pub const SUPPORTED: [Topic; 4] = [Self::Java, Self::JavaScript, Self::Cpp, Self::Dbms];

    /// Resolves a topic identifier. Unknown identifiers are kept verbatim.
    pub fn parse(id: &str) -> Self {
        match id {
            "java" => Self::Java,
            "javascript" => Self::JavaScript,
            "cpp" => Self::Cpp,
            "dbms" => Self::Dbms,
            other => Self::Other(other.into()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Cpp => "cpp",
            Self::Dbms => "dbms",
            Self::Other(id) => id,
        }
    }

    /// Category label understood by the question service.
    pub fn category(&self) -> &str {
        match self {
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::Cpp => "C++",
            Self::Dbms => "DBMS",
            Self::Other(id) => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Java => "Java Programming",
            Self::JavaScript => "JavaScript Fundamentals",
            Self::Cpp => "C++ Programming",
            Self::Dbms => "Database Management System",
            Self::Other(id) => id,
        }
    }
}

impl From<&str> for Topic {
    fn from(id: &str) -> Self {
        Self::parse(id)
    }
}

impl Serialize for Topic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.id())
    }
}
