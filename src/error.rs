use thiserror::Error;

use crate::model::{PlanetID, VesselID};

/// Which failure family an [Error] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Docking,
    Capacity,
    Lookup,
}

/// Malformed constructor or method arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Название {subject} должно быть непустой строкой")]
    EmptyName { subject: Subject },
    #[error("Местоположение {subject} должно быть массивом из двух чисел")]
    MalformedPosition { subject: Subject },
    #[error("Грузоподъемность корабля должна быть положительным числом")]
    BadCapacity,
    #[error("Доступное на планете количество груза должно быть неотрицательным числом")]
    BadAvailableCargo,
    #[error("Новое количество груза должно быть числом")]
    NotANumber,
    #[error("Корабль не приземлен")]
    NotLanded,
    #[error("Новое количество груза должно быть положительным числом")]
    NonPositiveCargo,
    #[error("Новое количество груза должно не превышать грузоподъемность корабля")]
    OverCapacity,
    #[error("Новое местоположение корабля должно иметь две числовые координаты")]
    MalformedDestination,
    #[error("Новое местоположение корабля должно либо ссылаться на планету, либо быть массивом из двух чисел")]
    NotADestination,
    #[error("Вес {direction} груза должен быть положительным числом")]
    NonPositiveWeight { direction: Direction },
}

/// The vessel is not where a transfer needs it to be.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DockingError {
    #[error("Корабль \"{vessel}\" не находится над планетой \"{planet}\"")]
    NotAtPlanet { vessel: String, planet: String },
    #[error("Корабль \"{vessel}\" не приземлен ни на одну планету")]
    NotDocked { vessel: String },
}

/// A transfer would exceed the available supply or space.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapacityError {
    #[error("На планете \"{planet}\" грузов нет. Ожидается загрузка {}т.", num(.requested))]
    PlanetEmpty { planet: String, requested: f64 },
    #[error("На планете \"{planet}\" {}т груза. Ожидается загрузка {}т.", num(.available), num(.requested))]
    PlanetShort {
        planet: String,
        available: f64,
        requested: f64,
    },
    #[error("На корабле \"{vessel}\" недостаточно свободного места. Свободного места нет!. Ожидается загрузка {}т.", num(.requested))]
    NoFreeSpace { vessel: String, requested: f64 },
    #[error("На корабле \"{vessel}\" недостаточно свободного места. Есть место для {}т груза. Ожидается загрузка {}т.", num(.free), num(.requested))]
    NotEnoughFreeSpace {
        vessel: String,
        free: f64,
        requested: f64,
    },
    #[error("На корабле \"{vessel}\" недостаточно груза. Груза нет!. Ожидается выгрузка {}т.", num(.requested))]
    VesselEmpty { vessel: String, requested: f64 },
    #[error("На корабле \"{vessel}\" недостаточно груза. Имеется {}т груза. Ожидается выгрузка {}т.", num(.occupied), num(.requested))]
    NotEnoughCargo {
        vessel: String,
        occupied: f64,
        requested: f64,
    },
    #[error("На планете \"{planet}\" {}т груза, принять ещё {}т невозможно.", num(.available), num(.requested))]
    PoolOverflow {
        planet: String,
        available: f64,
        requested: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Docking(#[from] DockingError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error("Неизвестная планета {0:?}")]
    UnknownPlanet(PlanetID),
    #[error("Неизвестный корабль {0:?}")]
    UnknownVessel(VesselID),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Docking(_) => ErrorKind::Docking,
            Error::Capacity(_) => ErrorKind::Capacity,
            Error::UnknownPlanet(_) | Error::UnknownVessel(_) => ErrorKind::Lookup,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Whose argument failed validation; renders as the genitive noun used in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Vessel,
    Planet,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Vessel => write!(f, "корабля"),
            Subject::Planet => write!(f, "планеты"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Load,
    Unload,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Load => write!(f, "загружаемого"),
            Direction::Unload => write!(f, "выгружаемого"),
        }
    }
}

fn num(value: &f64) -> crate::validation::Number {
    crate::validation::Number(*value)
}
