use museum_locale::{Locale, Locales};

/// UI strings for one content language.
#[derive(Debug)]
pub struct Messages {
    pub lang: &'static str,
    pub site_name: &'static str,
    pub nav_home: &'static str,
    pub nav_regions: &'static str,
    pub nav_countries: &'static str,
    pub nav_stories: &'static str,
    pub home_intro: &'static str,
    pub regions_heading: &'static str,
    pub countries_heading: &'static str,
    pub stories_heading: &'static str,
    pub read_more: &'static str,
    pub region_label: &'static str,
    pub switch_language: &'static str,
    pub not_found: &'static str,
    pub back_to_stories: &'static str,
}

pub static ZH_CN: Messages = Messages {
    lang: "zh-CN",
    site_name: "博物馆宇宙",
    nav_home: "首页",
    nav_regions: "地区",
    nav_countries: "国家",
    nav_stories: "故事",
    home_intro: "穿越世界各地的博物馆，探索藏品背后的故事。",
    regions_heading: "按地区浏览",
    countries_heading: "按国家浏览",
    stories_heading: "馆藏故事",
    read_more: "阅读全文",
    region_label: "地区",
    switch_language: "语言",
    not_found: "页面不存在",
    back_to_stories: "返回故事列表",
};

pub static EN: Messages = Messages {
    lang: "en",
    site_name: "Museum Universe",
    nav_home: "Home",
    nav_regions: "Regions",
    nav_countries: "Countries",
    nav_stories: "Stories",
    home_intro: "Travel through the world's museums and the stories behind their collections.",
    regions_heading: "Browse by region",
    countries_heading: "Browse by country",
    stories_heading: "Collection stories",
    read_more: "Read more",
    region_label: "Region",
    switch_language: "Language",
    not_found: "Page not found",
    back_to_stories: "Back to stories",
};

static BUNDLES: &[&Messages] = &[&ZH_CN, &EN];

fn lookup(tag: &str) -> Option<&'static Messages> {
    BUNDLES.iter().copied().find(|m| m.lang == tag)
}

/// Bundle for `locale`, falling back to the default locale's bundle and
/// finally to English when a configured locale ships no strings.
pub fn bundle(locales: &Locales, locale: &Locale) -> &'static Messages {
    lookup(locale.as_str())
        .or_else(|| lookup(locales.default_tag()))
        .unwrap_or(&EN)
}

/// Human-readable name of a locale, in that locale.
pub fn endonym(tag: &str) -> &str {
    match tag {
        "zh-CN" => "简体中文",
        "en" => "English",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_bundle_for_locale() {
        let locales = Locales::default();
        let en = locales.parse("en").unwrap();
        assert_eq!(bundle(&locales, &en).nav_stories, "Stories");
        assert_eq!(bundle(&locales, &locales.default_locale()).nav_stories, "故事");
    }

    #[test]
    fn unknown_locale_falls_back_to_default_bundle() {
        let locales = Locales::new(vec!["fr".into(), "en".into()], "en", "NEXT_LOCALE").unwrap();
        let fr = locales.parse("fr").unwrap();
        assert_eq!(bundle(&locales, &fr).lang, "en");

        let locales = Locales::new(vec!["fr".into()], "fr", "NEXT_LOCALE").unwrap();
        let fr = locales.parse("fr").unwrap();
        assert_eq!(bundle(&locales, &fr).lang, "en");
    }
}
