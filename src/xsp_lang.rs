// Multi-language support module
// Provides localized UI strings for English and Russian

#[derive(Clone)]
pub struct Assets {
    // Menu items
    pub menu_rules: &'static str,
    pub menu_new: &'static str,
    pub menu_settings: &'static str,
    pub menu_about: &'static str,
    pub menu_exit: &'static str,

    // Status bar
    pub status_time: &'static str,
    pub status_mines: &'static str,

    // Settings modal
    pub set_rows_label: &'static str,
    pub set_columns_label: &'static str,
    pub set_mines_label: &'static str,

    // Validation messages
    pub err_rows: &'static str,
    pub err_columns: &'static str,
    pub err_mines_fmt: &'static str, // "mines must be between 1 and {}"
    pub err_integer: &'static str,
    pub err_startup: &'static str,

    // Rules modal
    pub rules_goal: &'static str,
    pub rules_left: &'static str,
    pub rules_right: &'static str,
    pub rules_numbers: &'static str,
    pub rules_mine: &'static str,
    pub rules_win: &'static str,

    // Win/Loss modals
    pub win_title: &'static str,
    pub win_message: &'static str,
    pub win_time_fmt: &'static str, // "Time: {} seconds"
    pub win_hint: &'static str,

    pub loss_title: &'static str,
    pub loss_message: &'static str,

    // About modal
    pub about_description: &'static str,
    pub about_version_fmt: &'static str, // "v{}"

    // Buttons
    pub btn_ok: &'static str,
    pub btn_close: &'static str,

    // Terminal size messages
    pub tsmsg_title: &'static str,
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str, // "Minimum size required: {} x {}"
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        menu_rules: "Rules",
        menu_new: "New",
        menu_settings: "Settings",
        menu_about: "About",
        menu_exit: "Exit",

        status_time: "Time",
        status_mines: "Mines",

        set_rows_label: "Rows (5-20):",
        set_columns_label: "Columns (5-30):",
        set_mines_label: "Mines:",

        err_rows: "Rows must be between 5 and 20",
        err_columns: "Columns must be between 5 and 30",
        err_mines_fmt: "Mines must be between 1 and {}",
        err_integer: "Please enter whole numbers",
        err_startup: "Invalid saved settings",

        rules_goal: " 1. Open every cell that hides no mine.",
        rules_left: " 2. Left click or Space opens a cell.",
        rules_right: " 3. Right click or F places/removes a flag.",
        rules_numbers: " 4. A number counts the mines in adjacent cells.",
        rules_mine: " 5. Opening a mine loses the game.",
        rules_win: " 6. Open all safe cells to win - flags are optional.",

        win_title: "Victory!",
        win_message: "You win - the field is clear!",
        win_time_fmt: "Time: {} seconds",
        win_hint: "Press F2 to play again.",

        loss_title: "Game over",
        loss_message: "You stepped on a mine!",

        about_description: "A terminal-based classic Minesweeper game",
        about_version_fmt: "v{}",

        btn_ok: " OK ",
        btn_close: " CLOSE ",

        tsmsg_title: "Resize needed",
        tsmsg_line1: "Terminal layout too small",
        tsmsg_line2: "Minimum size required: {} x {}",
    }
}

/// Returns Russian language assets
pub fn russian_assets() -> Assets {
    Assets {
        menu_rules: "Правила",
        menu_new: "Новая игра",
        menu_settings: "Настройки",
        menu_about: "О программе",
        menu_exit: "Выход",

        status_time: "Время",
        status_mines: "Мины",

        set_rows_label: "Строки (5-20):",
        set_columns_label: "Колонки (5-30):",
        set_mines_label: "Мины:",

        err_rows: "Количество строк должно быть от 5 до 20",
        err_columns: "Количество колонок должно быть от 5 до 30",
        err_mines_fmt: "Количество мин должно быть от 1 до {}",
        err_integer: "Пожалуйста, введите целые числа",
        err_startup: "Некорректные сохранённые настройки",

        rules_goal: " 1. Откройте все клетки без мин.",
        rules_left: " 2. Левый клик или пробел открывает клетку.",
        rules_right: " 3. Правый клик или F ставит/убирает флаг.",
        rules_numbers: " 4. Цифра показывает число мин в соседних клетках.",
        rules_mine: " 5. Открыв мину, вы проигрываете.",
        rules_win: " 6. Откройте все безопасные клетки - флаги не обязательны.",

        win_title: "Победа!",
        win_message: "Вы выиграли - поле разминировано!",
        win_time_fmt: "Время: {} сек.",
        win_hint: "Нажмите F2, чтобы сыграть ещё раз.",

        loss_title: "Конец игры",
        loss_message: "Вы наступили на мину!",

        about_description: "Классический Сапер для терминала",
        about_version_fmt: "v{}",

        btn_ok: " ОК ",
        btn_close: " ЗАКРЫТЬ ",

        tsmsg_title: "Нужен размер больше",
        tsmsg_line1: "Окно терминала слишком мало",
        tsmsg_line2: "Минимальный размер: {} x {}",
    }
}

/// Main language manager struct
/// Holds the current language code and active string assets
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Creates a new Lang instance from a language code
    /// Normalizes input (e.g., "ru-RU" -> "ru") and defaults to English
    pub fn new(lang_code: &str) -> Self {
        let normalized = lang_code.to_lowercase();
        let code = if normalized.starts_with("ru") { "ru" } else { "en" };

        Lang {
            current_lang: code.to_string(),
            assets: if code == "ru" {
                russian_assets()
            } else {
                english_assets()
            },
        }
    }
}
