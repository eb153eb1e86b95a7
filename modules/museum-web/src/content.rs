//! Built-in collection content, one translation per shipped language.

/// A string with a Chinese and an English rendering.
#[derive(Debug, Clone, Copy)]
pub struct Text {
    pub zh: &'static str,
    pub en: &'static str,
}

impl Text {
    pub fn get(&self, lang: &str) -> &'static str {
        if lang.starts_with("zh") {
            self.zh
        } else {
            self.en
        }
    }
}

#[derive(Debug)]
pub struct Region {
    pub slug: &'static str,
    pub name: Text,
}

#[derive(Debug)]
pub struct Country {
    pub slug: &'static str,
    pub region: &'static str,
    pub name: Text,
}

#[derive(Debug)]
pub struct Story {
    pub slug: &'static str,
    pub country: &'static str,
    pub title: Text,
    pub summary: Text,
    pub body: Text,
}

pub static REGIONS: &[Region] = &[
    Region {
        slug: "east-asia",
        name: Text { zh: "东亚", en: "East Asia" },
    },
    Region {
        slug: "europe",
        name: Text { zh: "欧洲", en: "Europe" },
    },
    Region {
        slug: "africa",
        name: Text { zh: "非洲", en: "Africa" },
    },
    Region {
        slug: "americas",
        name: Text { zh: "美洲", en: "Americas" },
    },
];

pub static COUNTRIES: &[Country] = &[
    Country {
        slug: "china",
        region: "east-asia",
        name: Text { zh: "中国", en: "China" },
    },
    Country {
        slug: "japan",
        region: "east-asia",
        name: Text { zh: "日本", en: "Japan" },
    },
    Country {
        slug: "france",
        region: "europe",
        name: Text { zh: "法国", en: "France" },
    },
    Country {
        slug: "egypt",
        region: "africa",
        name: Text { zh: "埃及", en: "Egypt" },
    },
    Country {
        slug: "mexico",
        region: "americas",
        name: Text { zh: "墨西哥", en: "Mexico" },
    },
];

pub static STORIES: &[Story] = &[
    Story {
        slug: "jade-burial-suit",
        country: "china",
        title: Text { zh: "金缕玉衣", en: "The Jade Burial Suit" },
        summary: Text {
            zh: "两千余片玉片以金丝连缀，汉代王侯追求不朽的见证。",
            en: "Over two thousand jade plates sewn with gold wire, a Han prince's bid for immortality.",
        },
        body: Text {
            zh: "1968年出土于河北满城汉墓，金缕玉衣展示了汉代玉器工艺的巅峰。",
            en: "Excavated at Mancheng in 1968, the suit shows Han dynasty jade working at its height.",
        },
    },
    Story {
        slug: "great-wave",
        country: "japan",
        title: Text { zh: "神奈川冲浪里", en: "The Great Wave" },
        summary: Text {
            zh: "葛饰北斋的木版画如何跨越海洋影响了欧洲艺术。",
            en: "How Hokusai's woodblock print crossed oceans and reshaped European art.",
        },
        body: Text {
            zh: "这幅作品印制了数千次，如今在世界各地的博物馆中都能见到它的身影。",
            en: "Printed thousands of times, impressions now hang in museums around the world.",
        },
    },
    Story {
        slug: "rosetta-stone",
        country: "egypt",
        title: Text { zh: "罗塞塔石碑", en: "The Rosetta Stone" },
        summary: Text {
            zh: "三种文字刻写同一道诏令，打开了古埃及象形文字之门。",
            en: "One decree in three scripts that unlocked Egyptian hieroglyphs.",
        },
        body: Text {
            zh: "商博良于1822年借助石碑上的希腊文破译了象形文字。",
            en: "Champollion used the Greek text on the stone to decipher hieroglyphs in 1822.",
        },
    },
    Story {
        slug: "sun-stone",
        country: "mexico",
        title: Text { zh: "太阳石", en: "The Sun Stone" },
        summary: Text {
            zh: "重达二十四吨的阿兹特克巨石，记录着宇宙的轮回。",
            en: "A twenty-four tonne Aztec monolith recording the cycles of the cosmos.",
        },
        body: Text {
            zh: "太阳石于1790年在墨西哥城中央广场重见天日。",
            en: "The stone resurfaced in Mexico City's main square in 1790.",
        },
    },
];

pub fn region(slug: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.slug == slug)
}

pub fn country(slug: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.slug == slug)
}

pub fn story(slug: &str) -> Option<&'static Story> {
    STORIES.iter().find(|s| s.slug == slug)
}
