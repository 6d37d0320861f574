use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

/// Radicals sharing a stroke count, in picker order.
pub struct StrokeGroup {
    pub strokes: u8,
    pub glyphs: &'static [&'static str],
}

/// Fixed catalogue of search radicals. There are no 15- or 16-stroke groups.
pub const GROUPS: &[StrokeGroup] = &[
    StrokeGroup {
        strokes: 1,
        glyphs: &["一", "｜", "丶", "ノ", "乙", "亅"],
    },
    StrokeGroup {
        strokes: 2,
        glyphs: &[
            "二", "亠", "人", "⺅", "𠆢", "儿", "入", "ハ", "丷", "冂", "冖", "冫", "几", "凵", "刀",
            "⺉", "力", "勹", "匕", "匚", "十", "卜", "卩", "厂", "厶", "又", "マ", "九", "ユ", "乃",
            "𠂉",
        ],
    },
    StrokeGroup {
        strokes: 3,
        glyphs: &[
            "⻌", "口", "囗", "土", "士", "夂", "夕", "大", "女", "子", "宀", "寸", "小", "⺌", "尢",
            "尸", "屮", "山", "川", "巛", "工", "已", "巾", "干", "幺", "广", "廴", "廾", "弋", "弓",
            "ヨ", "彑", "彡", "彳", "⺖", "⺘", "⺡", "⺨", "⺾", "⻏", "⻖", "也", "亡", "及", "久",
        ],
    },
    StrokeGroup {
        strokes: 4,
        glyphs: &[
            "⺹", "心", "戈", "戸", "手", "支", "攵", "文", "斗", "斤", "方", "无", "日", "曰", "月",
            "木", "欠", "止", "歹", "殳", "比", "毛", "氏", "气", "水", "火", "⺣", "爪", "父", "爻",
            "爿", "片", "牛", "犬", "⺭", "王", "元", "井", "勿", "尤", "五", "屯", "巴", "毋",
        ],
    },
    StrokeGroup {
        strokes: 5,
        glyphs: &[
            "玄", "瓦", "甘", "生", "用", "田", "疋", "疒", "癶", "白", "皮", "皿", "目", "矛", "矢",
            "石", "示", "禸", "禾", "穴", "立", "⻂", "世", "巨", "冊", "母", "⺲", "牙",
        ],
    },
    StrokeGroup {
        strokes: 6,
        glyphs: &[
            "瓜", "竹", "米", "糸", "缶", "羊", "羽", "而", "耒", "耳", "聿", "肉", "自", "至", "臼",
            "舌", "舟", "艮", "色", "虍", "虫", "血", "行", "衣", "西",
        ],
    },
    StrokeGroup {
        strokes: 7,
        glyphs: &[
            "臣", "見", "角", "言", "谷", "豆", "豕", "豸", "貝", "赤", "走", "足", "身", "車", "辛",
            "辰", "酉", "釆", "里", "舛", "麦",
        ],
    },
    StrokeGroup {
        strokes: 8,
        glyphs: &[
            "金", "長", "門", "隶", "隹", "雨", "青", "非", "奄", "岡", "免", "斉",
        ],
    },
    StrokeGroup {
        strokes: 9,
        glyphs: &["面", "革", "韭", "音", "頁", "風", "飛", "食", "首", "香", "品"],
    },
    StrokeGroup {
        strokes: 10,
        glyphs: &["馬", "骨", "高", "髟", "鬥", "鬯", "鬲", "鬼", "竜", "韋"],
    },
    StrokeGroup {
        strokes: 11,
        glyphs: &["魚", "鳥", "鹵", "鹿", "麻", "亀", "啇", "黄", "黒"],
    },
    StrokeGroup {
        strokes: 12,
        glyphs: &["黍", "黹", "無", "歯"],
    },
    StrokeGroup {
        strokes: 13,
        glyphs: &["黽", "鼎", "鼓", "鼠"],
    },
    StrokeGroup {
        strokes: 14,
        glyphs: &["鼻", "齊"],
    },
    StrokeGroup {
        strokes: 17,
        glyphs: &["龠"],
    },
];

/// Number of picker tabs the stroke groups are laid out on.
pub const PAGE_COUNT: usize = 10;

/// Stroke-group indices shown on picker tab `page`: the first tab combines
/// one and two strokes, the last one collects everything from eleven up.
/// Empty for pages past the last tab.
pub fn page_groups(page: usize) -> Range<usize> {
    match page {
        0 => 0..2,
        p if p + 1 < PAGE_COUNT => p + 1..p + 2,
        p if p + 1 == PAGE_COUNT => PAGE_COUNT..GROUPS.len(),
        _ => 0..0,
    }
}

/// Flat, position-indexed view over [`GROUPS`].
pub struct Taxonomy {
    glyphs: Vec<&'static str>,
    group_of: Vec<usize>,
    ranges: Vec<Range<usize>>,
    positions: HashMap<&'static str, usize>,
}

impl Taxonomy {
    pub fn global() -> &'static Taxonomy {
        static INSTANCE: OnceLock<Taxonomy> = OnceLock::new();
        INSTANCE.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut glyphs = Vec::new();
        let mut group_of = Vec::new();
        let mut ranges = Vec::with_capacity(GROUPS.len());
        for (g, group) in GROUPS.iter().enumerate() {
            let start = glyphs.len();
            glyphs.extend_from_slice(group.glyphs);
            group_of.extend(std::iter::repeat(g).take(group.glyphs.len()));
            ranges.push(start..glyphs.len());
        }
        let positions = glyphs.iter().enumerate().map(|(i, g)| (*g, i)).collect();
        Self {
            glyphs,
            group_of,
            ranges,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyph(&self, position: usize) -> &'static str {
        self.glyphs[position]
    }

    pub fn glyphs(&self) -> &[&'static str] {
        &self.glyphs
    }

    pub fn position(&self, glyph: &str) -> Option<usize> {
        self.positions.get(glyph).copied()
    }

    pub fn group_of(&self, position: usize) -> usize {
        self.group_of[position]
    }

    pub fn group_count(&self) -> usize {
        self.ranges.len()
    }

    /// Flat positions of the entries in stroke group `group`.
    pub fn group_range(&self, group: usize) -> Option<Range<usize>> {
        self.ranges.get(group).cloned()
    }
}
