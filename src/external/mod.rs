mod mapquest;

pub use mapquest::MapQuest;
