// Game timing
pub const DEFAULT_GAME_DURATION: u32 = 30;
pub const MARATHON_DURATION: u32 = 60;
pub const SPEED_DEMON_DURATION: u32 = 30;

// Persistence
pub const MAX_LOG_ENTRIES: usize = 50;
pub const ACHIEVEMENT_SAVE_INTERVAL_MS: u64 = 5000;
pub const SAVE_DIR_NAME: &str = ".speed_tapper";
pub const SAVE_FILE_NAME: &str = "save.json";

// Achievement thresholds
pub const TAPS_BRONZE: u64 = 100;
pub const TAPS_SILVER: u64 = 500;
pub const TAPS_GOLD: u64 = 1000;
pub const TARGET_HS_BRONZE: u64 = 50;
pub const TARGET_HS_GOLD: u64 = 100;
pub const TAP_HS_BRONZE: u64 = 30;
pub const TAP_HS_GOLD: u64 = 50;
pub const TWO_PLAYER_WINS_BRONZE: u64 = 10;
pub const TWO_PLAYER_WINS_GOLD: u64 = 50;
pub const TARGET_STREAK_BRONZE: u64 = 10;
pub const TARGET_STREAK_GOLD: u64 = 25;
pub const SINGLE_PLAYER_GAMES: u64 = 10;
pub const TWO_PLAYER_GAMES: u64 = 25;
pub const SPEED_DEMON_TAPS: u64 = 60;
