//! Model builders shared by the unit tests

use shared_types::{Connection, Data, FileType, Grade, Location, System, ZoneType};

pub fn zone(id: &str, grade: Grade, kind: ZoneType) -> Location {
    Location {
        id: id.into(),
        grade,
        kind,
    }
}

pub fn data(id: &str, grade: Grade) -> Data {
    Data {
        id: id.into(),
        grade,
        file_type: FileType::Document,
    }
}

pub fn media(id: &str, grade: Grade) -> Data {
    Data {
        file_type: FileType::Media,
        ..data(id, grade)
    }
}

pub fn system(id: &str, grade: Grade, loc: &str) -> System {
    System {
        grade,
        ..System::new(id, loc)
    }
}

pub fn connection(id: &str, from: &str, to: &str) -> Connection {
    Connection::new(id, from, to)
}
