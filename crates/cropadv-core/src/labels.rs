//! Localized display strings.
//!
//! Every language has one fixed [`Labels`] record. Lookups by raw tag fall
//! back to English when the tag is not recognized.

use crate::language::Language;

/// Labels used by the crop recommendation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLabels {
    pub state: &'static str,
    pub district: &'static str,
    pub month: &'static str,
    pub nitrogen: &'static str,
    pub phosphorous: &'static str,
    pub potassium: &'static str,
    pub ph: &'static str,
    pub submit: &'static str,
    pub use_soil_values: &'static str,
    pub auto_detect: &'static str,
    pub select_state: &'static str,
    pub select_district: &'static str,
    pub select_month: &'static str,
}

/// Labels used by the result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLabels {
    pub top_recommendations: &'static str,
    pub risk_level: &'static str,
    pub weather_conditions: &'static str,
    pub soil_values: &'static str,
    pub advisory: &'static str,
    pub confidence: &'static str,
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub rainfall: &'static str,
}

/// Labels for the surrounding application chrome (header, tabs, chat panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLabels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub form_tab: &'static str,
    pub chatbot_tab: &'static str,
    pub result_tab: &'static str,
    pub chat_title: &'static str,
    pub chat_subtitle: &'static str,
    pub chat_placeholder: &'static str,
    pub processing: &'static str,
}

/// Complete label set for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub language: Language,
    pub form: FormLabels,
    pub result: ResultLabels,
    pub chrome: ChromeLabels,
}

static EN: Labels = Labels {
    language: Language::En,
    form: FormLabels {
        state: "State",
        district: "District",
        month: "Month",
        nitrogen: "Nitrogen (N)",
        phosphorous: "Phosphorous (P)",
        potassium: "Potassium (K)",
        ph: "pH Value",
        submit: "Get Recommendation",
        use_soil_values: "Use My Own Soil Values",
        auto_detect: "Auto Detect Soil Values",
        select_state: "Select State",
        select_district: "Select District",
        select_month: "Select Month",
    },
    result: ResultLabels {
        top_recommendations: "Top Recommendations",
        risk_level: "Risk Level",
        weather_conditions: "Weather Conditions",
        soil_values: "Soil Values Used",
        advisory: "Advisory Message",
        confidence: "Confidence",
        temperature: "Temperature",
        humidity: "Humidity",
        rainfall: "Rainfall",
    },
    chrome: ChromeLabels {
        title: "Smart Crop Advisory System",
        subtitle: "AI-Powered Crop Recommendations for Better Farming",
        form_tab: "Recommendation Form",
        chatbot_tab: "Chatbot Assistant",
        result_tab: "Results",
        chat_title: "Crop Advisory Chatbot",
        chat_subtitle: "Chat with me to get crop recommendations",
        chat_placeholder: "Type your message...",
        processing: "Processing...",
    },
};

static HI: Labels = Labels {
    language: Language::Hi,
    form: FormLabels {
        state: "राज्य",
        district: "जिला",
        month: "महीना",
        nitrogen: "नाइट्रोजन (N)",
        phosphorous: "फॉस्फोरस (P)",
        potassium: "पोटेशियम (K)",
        ph: "pH मान",
        submit: "सिफारिश प्राप्त करें",
        use_soil_values: "मेरे अपने मिट्टी मान का उपयोग करें",
        auto_detect: "मिट्टी मान स्वचालित रूप से प्राप्त करें",
        select_state: "राज्य चुनें",
        select_district: "जिला चुनें",
        select_month: "महीना चुनें",
    },
    result: ResultLabels {
        top_recommendations: "शीर्ष सिफारिशें",
        risk_level: "जोखिम स्तर",
        weather_conditions: "मौसम की स्थिति",
        soil_values: "उपयोग की गई मिट्टी मान",
        advisory: "सलाह संदेश",
        confidence: "आत्मविश्वास",
        temperature: "तापमान",
        humidity: "आर्द्रता",
        rainfall: "वर्षा",
    },
    chrome: ChromeLabels {
        title: "स्मार्ट फसल सलाह प्रणाली",
        subtitle: "बेहतर खेती के लिए एआई आधारित फसल सिफारिशें",
        form_tab: "सिफारिश फॉर्म",
        chatbot_tab: "चैटबॉट सहायक",
        result_tab: "परिणाम",
        chat_title: "फसल सलाह चैटबॉट",
        chat_subtitle: "फसल सिफारिश पाने के लिए मुझसे बात करें",
        chat_placeholder: "अपना संदेश लिखें...",
        processing: "प्रक्रिया जारी है...",
    },
};

static MR: Labels = Labels {
    language: Language::Mr,
    form: FormLabels {
        state: "राज्य",
        district: "जिल्हा",
        month: "महिना",
        nitrogen: "नायट्रोजन (N)",
        phosphorous: "फॉस्फोरस (P)",
        potassium: "पोटॅशियम (K)",
        ph: "pH मूल्य",
        submit: "शिफारस प्राप्त करा",
        use_soil_values: "माझे स्वतःचे माती मूल्य वापरा",
        auto_detect: "माती मूल्य स्वयंचलितपणे शोधा",
        select_state: "राज्य निवडा",
        select_district: "जिल्हा निवडा",
        select_month: "महिना निवडा",
    },
    result: ResultLabels {
        top_recommendations: "शीर्ष शिफारसी",
        risk_level: "जोखिम स्तर",
        weather_conditions: "हवामान परिस्थिती",
        soil_values: "वापरल्या जाणारे माती मूल्य",
        advisory: "सल्ला संदेश",
        confidence: "आत्मविश्वास",
        temperature: "तापमान",
        humidity: "आर्द्रता",
        rainfall: "पावसाळ",
    },
    chrome: ChromeLabels {
        title: "स्मार्ट पीक सल्ला प्रणाली",
        subtitle: "चांगल्या शेतीसाठी एआय आधारित पीक शिफारसी",
        form_tab: "शिफारस फॉर्म",
        chatbot_tab: "चॅटबॉट सहाय्यक",
        result_tab: "निकाल",
        chat_title: "पीक सल्ला चॅटबॉट",
        chat_subtitle: "पीक शिफारसीसाठी माझ्याशी गप्पा मारा",
        chat_placeholder: "तुमचा संदेश लिहा...",
        processing: "प्रक्रिया सुरू आहे...",
    },
};

/// Returns the label set for a language.
pub fn labels_for(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Hi => &HI,
        Language::Mr => &MR,
    }
}

/// Returns the label set for a raw language tag, English if unrecognized.
pub fn labels_for_tag(tag: &str) -> &'static Labels {
    labels_for(Language::from_tag_or_default(tag))
}
