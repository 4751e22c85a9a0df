use crate::{
    reading::translit::TableTransliterator,
    script::{Script, ScriptCategory},
};

fn lowercase_letter(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        'ґ' => "g",
        'ў' => "w",
        _ => return None,
    };

    Some(latin)
}

pub fn romanize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());

    for ch in word.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);

        match lowercase_letter(lower) {
            Some(latin) if lower != ch => {
                let mut letters = latin.chars();
                if let Some(first) = letters.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(letters.as_str());
                }
            }
            Some(latin) => out.push_str(latin),
            None => out.push(ch),
        }
    }

    out
}

pub fn provider() -> TableTransliterator {
    TableTransliterator::new(Script::Cyrillic, ScriptCategory::Cyrillic, romanize)
}
