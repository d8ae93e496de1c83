//! Station directory: line ↔ station mappings.
//!
//! Each line carries its stations in travel order. A reverse index from
//! station name to line is built once at construction, so resolving a
//! station (the route-resolver operation) is a single hash lookup.
//!
//! Interchange stations are listed under one primary line only; the
//! directory invariant is that every station name appears in exactly one
//! list. Lookup priority is therefore irrelevant — there is never a second
//! match.

use std::collections::HashMap;

use crate::domain::{ALL_LINES, Line};

/// Tamsui–Xinyi line, Xiangshan → Tamsui.
const RED: &[&str] = &[
    "象山",
    "台北101/世貿",
    "信義安和",
    "大安",
    "大安森林公園",
    "東門",
    "中正紀念堂",
    "台大醫院",
    "台北車站",
    "中山",
    "雙連",
    "民權西路",
    "圓山",
    "劍潭",
    "士林",
    "芝山",
    "明德",
    "石牌",
    "唭哩岸",
    "奇岩",
    "北投",
    "新北投",
    "復興崗",
    "忠義",
    "關渡",
    "竹圍",
    "紅樹林",
    "淡水",
];

/// Bannan line, Dingpu → Nangang Exhibition Center.
/// 台北車站 is primary on Red.
const BLUE: &[&str] = &[
    "頂埔",
    "永寧",
    "土城",
    "海山",
    "亞東醫院",
    "府中",
    "板橋",
    "新埔",
    "江子翠",
    "龍山寺",
    "西門",
    "善導寺",
    "忠孝新生",
    "忠孝復興",
    "忠孝敦化",
    "國父紀念館",
    "市政府",
    "永春",
    "後山埤",
    "昆陽",
    "南港",
    "南港展覽館",
];

/// Songshan–Xindian line, Songshan → Xindian, with the Xiaobitan spur.
const GREEN: &[&str] = &[
    "松山",
    "南京三民",
    "台北小巨蛋",
    "南京復興",
    "松江南京",
    "北門",
    "小南門",
    "古亭",
    "台電大樓",
    "公館",
    "萬隆",
    "景美",
    "大坪林",
    "七張",
    "小碧潭",
    "新店區公所",
    "新店",
];

/// Zhonghe–Xinlu line, Nanshijiao → Huilong, then the Luzhou branch.
const ORANGE: &[&str] = &[
    "南勢角",
    "景安",
    "永安市場",
    "頂溪",
    "行天宮",
    "中山國小",
    "大橋頭",
    "台北橋",
    "菜寮",
    "三重",
    "先嗇宮",
    "頭前庄",
    "新莊",
    "輔大",
    "丹鳳",
    "迴龍",
    "三重國小",
    "三和國中",
    "徐匯中學",
    "三民高中",
    "蘆洲",
];

/// Wenhu line, Taipei Zoo → Nangang Software Park.
const BROWN: &[&str] = &[
    "動物園",
    "木柵",
    "萬芳社區",
    "萬芳醫院",
    "辛亥",
    "麟光",
    "六張犁",
    "科技大樓",
    "中山國中",
    "松山機場",
    "大直",
    "劍南路",
    "西湖",
    "港墘",
    "文德",
    "內湖",
    "大湖公園",
    "葫洲",
    "東湖",
    "南港軟體園區",
];

/// Circular line, Shisizhang → New Taipei Industrial Park.
const YELLOW: &[&str] = &[
    "十四張",
    "秀朗橋",
    "景平",
    "中和",
    "橋和",
    "中原",
    "板新",
    "新埔民生",
    "幸福",
    "新北產業園區",
];

/// Ordered station lists per line, with a reverse station → line index.
pub struct StationDirectory {
    by_line: HashMap<Line, &'static [&'static str]>,
    by_station: HashMap<&'static str, Line>,
}

impl StationDirectory {
    /// Build a directory from explicit line tables.
    ///
    /// Station names must be unique across all tables; a duplicate would
    /// make resolution order-dependent, so it is rejected here.
    pub fn new(entries: &[(Line, &'static [&'static str])]) -> Self {
        let mut by_line = HashMap::new();
        let mut by_station = HashMap::new();

        for &(line, stations) in entries {
            by_line.insert(line, stations);
            for &station in stations {
                let previous = by_station.insert(station, line);
                assert!(
                    previous.is_none(),
                    "station {station} appears under more than one line"
                );
            }
        }

        Self {
            by_line,
            by_station,
        }
    }

    /// The full Taipei Metro directory.
    pub fn taipei() -> Self {
        Self::new(&[
            (Line::Red, RED),
            (Line::Blue, BLUE),
            (Line::Green, GREEN),
            (Line::Orange, ORANGE),
            (Line::Brown, BROWN),
            (Line::Yellow, YELLOW),
        ])
    }

    /// All lines present in the directory, in display order.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        ALL_LINES
            .into_iter()
            .filter(|line| self.by_line.contains_key(line))
    }

    /// The stations of a line, in stored travel order.
    ///
    /// Returns an empty slice for a line with no entry.
    pub fn stations_of(&self, line: Line) -> &'static [&'static str] {
        self.by_line.get(&line).copied().unwrap_or(&[])
    }

    /// Resolve a station name to its line.
    ///
    /// Returns `None` when the name is absent from every line's list.
    pub fn resolve(&self, station: &str) -> Option<Line> {
        self.by_station.get(station).copied()
    }

    /// Total number of stations across all lines.
    pub fn len(&self) -> usize {
        self.by_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }
}
