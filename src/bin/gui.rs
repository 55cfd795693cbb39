#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use dilution_calculator::{
    config, conversion,
    format::format_general,
    i18n::{self, keys, Translator},
    logging,
    quantity::{QuantityKind, QuantitySlot, MOLAR_MASS_UNIT},
    solver::{self, CalcError, Calculator, Solution},
};
use eframe::{egui, App, Frame};
use tracing::{debug, info, warn};

/// 희석 계산기 GUI.
#[derive(Debug, Parser)]
#[command(name = "dilution_calculator", version, about)]
struct GuiArgs {
    /// 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// 처음 열 계산기 경로 (/molarity, /mass-concentration, /prepare-molar-solution)
    #[arg(long)]
    page: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let config_path = config::resolve_path(args.config.as_deref());
    let mut app_cfg = match config::load_or_create(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("설정 오류: {e}");
            config::Config::default()
        }
    };
    logging::init(&app_cfg.log_filter);
    if let Some(page) = args.page.as_deref() {
        app_cfg.last_calculator = Calculator::from_route(page);
    }
    let lang = i18n::resolve_language(&args.lang, Some(&app_cfg.language));
    let tr = Translator::new_with_pack(&lang, None);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 640.0])
        .with_min_inner_size([720.0, 480.0]);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let title = tr.t(keys::APP_TITLE).into_owned();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!(reason = %e, "{}", tr.t(keys::GUI_FONT_MISSING));
            }
            Box::new(GuiApp::new(app_cfg, config_path, tr))
        }),
    )
}

/// 시스템 한글 글꼴 후보 (Linux/macOS)
const UNIX_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
];

/// 바이너리 폰트 바이트를 기본 글꼴 뒤의 대체 글꼴로 egui에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(name.to_string());
    }
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 글꼴을 찾는다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림)
/// 3) Linux/macOS 시스템 폰트
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(UNIX_FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            info!(path = %path.display(), "글꼴 로드");
            return Ok(());
        }
    }
    Err("Korean font not found; Hangul labels may not render.".into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Calculator(Calculator),
    MassFromVolume,
    UnitConv,
}

/// 한 칸을 비워 두는 계산기 화면의 입력 상태.
#[derive(Debug, Clone)]
struct CalcForm {
    values: [String; 4],
    units: [String; 4],
    result: Option<Result<Solution, CalcError>>,
}

impl CalcForm {
    fn new(units: [&str; 4]) -> Self {
        Self {
            values: Default::default(),
            units: units.map(String::from),
            result: None,
        }
    }

    fn slots(&self) -> Vec<QuantitySlot> {
        self.values
            .iter()
            .zip(&self.units)
            .map(|(v, u)| QuantitySlot::given(v.clone(), u.clone()))
            .collect()
    }

    fn clear(&mut self) {
        self.values = Default::default();
        self.result = None;
    }
}

#[derive(Debug, Clone)]
struct MassForm {
    concentration: String,
    concentration_unit: String,
    volume: String,
    volume_unit: String,
    molar_mass: String,
    mass_unit: String,
    result: Option<Result<Solution, CalcError>>,
}

#[derive(Debug, Clone)]
struct ConvForm {
    kind: QuantityKind,
    value: String,
    from: String,
    to: String,
    result: Option<Result<String, CalcError>>,
}

impl ConvForm {
    fn reset_units(&mut self) {
        let symbols = self.kind.unit_symbols();
        self.from = symbols[0].to_string();
        self.to = symbols.get(1).unwrap_or(&symbols[0]).to_string();
    }
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: Translator,
    lang_input: String,
    tab: Tab,
    molarity: CalcForm,
    mass_concentration: CalcForm,
    prepare: CalcForm,
    mass_form: MassForm,
    conv: ConvForm,
    show_settings: bool,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf, tr: Translator) -> Self {
        let units = &config.default_units;
        let prepare_units = units.symbols_for(Calculator::PrepareSolution);
        let mut conv = ConvForm {
            kind: QuantityKind::Volume,
            value: String::new(),
            from: String::new(),
            to: String::new(),
            result: None,
        };
        conv.reset_units();
        Self {
            lang_input: config.language.clone(),
            tab: Tab::Calculator(config.last_calculator),
            molarity: CalcForm::new(units.symbols_for(Calculator::MolarDilution)),
            mass_concentration: CalcForm::new(
                units.symbols_for(Calculator::MassConcentrationDilution),
            ),
            prepare: CalcForm::new(prepare_units),
            mass_form: MassForm {
                concentration: String::new(),
                concentration_unit: prepare_units[0].into(),
                volume: String::new(),
                volume_unit: prepare_units[1].into(),
                molar_mass: String::new(),
                mass_unit: prepare_units[2].into(),
                result: None,
            },
            conv,
            show_settings: false,
            settings_status: None,
            config,
            config_path,
            tr,
        }
    }

    fn form(&self, calculator: Calculator) -> &CalcForm {
        match calculator {
            Calculator::MolarDilution => &self.molarity,
            Calculator::MassConcentrationDilution => &self.mass_concentration,
            Calculator::PrepareSolution => &self.prepare,
        }
    }

    fn form_mut(&mut self, calculator: Calculator) -> &mut CalcForm {
        match calculator {
            Calculator::MolarDilution => &mut self.molarity,
            Calculator::MassConcentrationDilution => &mut self.mass_concentration,
            Calculator::PrepareSolution => &mut self.prepare,
        }
    }

    /// 계산 버튼 처리. 성공하면 사용한 단위를 기본값 후보로 기억한다.
    fn calculate(&mut self, calculator: Calculator) {
        let (slots, units) = {
            let form = self.form(calculator);
            (form.slots(), form.units.to_vec())
        };
        let result = calculator.solve(&slots);
        match &result {
            Ok(_) => {
                self.config.default_units.remember(calculator, &units);
                self.config.last_calculator = calculator;
            }
            Err(e) => debug!(calculator = calculator.key(), error = %e, "계산 실패"),
        }
        self.form_mut(calculator).result = Some(result);
    }

    fn calculate_mass(&mut self) {
        let f = &self.mass_form;
        let result = solver::compute_mass_from_volume(
            &f.concentration,
            &f.concentration_unit,
            &f.volume,
            &f.volume_unit,
            &f.molar_mass,
            &f.mass_unit,
        );
        self.mass_form.result = Some(result);
    }

    fn convert(&mut self) {
        let c = &self.conv;
        let result = solver::parse_value("Value", Some(&c.value))
            .and_then(|v| {
                conversion::convert(c.kind, v, &c.from, &c.to).map_err(CalcError::from)
            })
            .map(|v| format!("{} {}", format_general(v), c.to));
        self.conv.result = Some(result);
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        let lang = i18n::resolve_language(&self.lang_input, None);
        self.tr = Translator::new_with_pack(&lang, None);
        self.settings_status = Some(match self.config.save_to(&self.config_path) {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).into_owned(),
            Err(e) => {
                warn!(error = %e, "설정 저장 실패");
                format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
            }
        });
    }

    /// 화면에 입력된 단위를 모두 기본값으로 옮긴다.
    fn remember_all_units(&mut self) {
        for calculator in Calculator::ALL {
            let units = self.form(calculator).units.to_vec();
            self.config.default_units.remember(calculator, &units);
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.vertical_centered(|ui| {
            ui.heading(tr.t(keys::GUI_NAV_HEADING).into_owned());
            ui.add_space(8.0);
        });
        let mut tabs: Vec<(Tab, String)> = Calculator::ALL
            .into_iter()
            .map(|c| (Tab::Calculator(c), tr.calculator_title(c)))
            .collect();
        tabs.push((
            Tab::MassFromVolume,
            tr.t(keys::MASS_FROM_VOLUME_TITLE).into_owned(),
        ));
        tabs.push((Tab::UnitConv, tr.t(keys::GUI_UNIT_CONVERTER).into_owned()));
        for (tab, label) in tabs {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui, calculator: Calculator) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.heading(tr.calculator_title(calculator));
        ui.label(tr.calculator_description(calculator));
        ui.add_space(8.0);

        let form = self.form_mut(calculator);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new(format!("grid_{}", calculator.key()))
                .num_columns(3)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for (i, term) in calculator.equation().terms.iter().enumerate() {
                        ui.label(tr.term_label(term));
                        ui.add(
                            egui::TextEdit::singleline(&mut form.values[i]).desired_width(140.0),
                        );
                        if term.kind == QuantityKind::MolarMass {
                            ui.label(MOLAR_MASS_UNIT);
                        } else {
                            unit_combo(
                                ui,
                                format!("{}_{}", calculator.key(), term.key),
                                &mut form.units[i],
                                &term.kind.unit_symbols(),
                            );
                        }
                        ui.end_row();
                    }
                });
        });

        let mut calculate = false;
        let mut clear = false;
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            calculate = ui.button(txt(keys::GUI_CALCULATE)).clicked();
            clear = ui.button(txt(keys::GUI_CLEAR)).clicked();
        });
        if calculate {
            self.calculate(calculator);
        }
        if clear {
            self.form_mut(calculator).clear();
        }
        show_result(ui, &tr, self.form(calculator).result.as_ref());
    }

    fn ui_mass_from_volume(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        ui.heading(txt(keys::MASS_FROM_VOLUME_TITLE));
        ui.label(txt(keys::MASS_FROM_VOLUME_DESCRIPTION));
        ui.add_space(8.0);

        let terms = solver::PREPARE_SOLUTION.terms;
        let f = &mut self.mass_form;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("grid_mass_from_volume")
                .num_columns(3)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(tr.term_label(&terms[0]));
                    ui.add(egui::TextEdit::singleline(&mut f.concentration).desired_width(140.0));
                    unit_combo(
                        ui,
                        "mfv_conc",
                        &mut f.concentration_unit,
                        &QuantityKind::MolarConcentration.unit_symbols(),
                    );
                    ui.end_row();

                    ui.label(tr.term_label(&terms[1]));
                    ui.add(egui::TextEdit::singleline(&mut f.volume).desired_width(140.0));
                    unit_combo(
                        ui,
                        "mfv_vol",
                        &mut f.volume_unit,
                        &QuantityKind::Volume.unit_symbols(),
                    );
                    ui.end_row();

                    ui.label(tr.term_label(&terms[3]));
                    ui.add(egui::TextEdit::singleline(&mut f.molar_mass).desired_width(140.0));
                    ui.label(MOLAR_MASS_UNIT);
                    ui.end_row();

                    ui.label(tr.term_label(&terms[2]));
                    ui.label("");
                    unit_combo(
                        ui,
                        "mfv_mass",
                        &mut f.mass_unit,
                        &QuantityKind::Mass.unit_symbols(),
                    );
                    ui.end_row();
                });
        });

        ui.add_space(8.0);
        if ui.button(txt(keys::GUI_CALCULATE)).clicked() {
            self.calculate_mass();
        }
        show_result(ui, &tr, self.mass_form.result.as_ref());
    }

    fn ui_unit_conv(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_UNIT_CONVERTER).into_owned());
        ui.add_space(8.0);

        let before = self.conv.kind;
        let c = &mut self.conv;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("conv_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(tr.t(keys::GUI_QUANTITY).into_owned());
                    egui::ComboBox::from_id_source("conv_kind")
                        .selected_text(tr.quantity_name(c.kind))
                        .show_ui(ui, |ui| {
                            for kind in QuantityKind::CONVERTIBLE {
                                ui.selectable_value(&mut c.kind, kind, tr.quantity_name(kind));
                            }
                        });
                    ui.end_row();

                    ui.label(tr.t(keys::GUI_VALUE).into_owned());
                    ui.add(egui::TextEdit::singleline(&mut c.value).desired_width(140.0));
                    ui.end_row();
                });
        });
        if self.conv.kind != before {
            self.conv.reset_units();
            self.conv.result = None;
        }

        let symbols = self.conv.kind.unit_symbols();
        ui.horizontal(|ui| {
            unit_combo(ui, "conv_from", &mut self.conv.from, &symbols);
            ui.label("→");
            unit_combo(ui, "conv_to", &mut self.conv.to, &symbols);
        });
        ui.add_space(8.0);
        if ui.button(tr.t(keys::GUI_CONVERT).into_owned()).clicked() {
            self.convert();
        }
        match &self.conv.result {
            Some(Ok(text)) => {
                ui.colored_label(
                    success_color(),
                    format!("{} {text}", tr.t(keys::UNIT_CONVERSION_RESULT)),
                );
            }
            Some(Err(e)) => {
                ui.colored_label(ui.visuals().error_fg_color, tr.calc_error(e));
            }
            None => {}
        }
    }

    fn ui_settings_window(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        let mut open = self.show_settings;
        let mut save = false;
        let mut save_units = false;
        let mut close = false;
        egui::Window::new(txt(keys::GUI_SETTINGS))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(txt(keys::SETTINGS_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_combo")
                        .selected_text(self.lang_input.clone())
                        .show_ui(ui, |ui| {
                            for code in ["auto", "ko", "en"] {
                                ui.selectable_value(&mut self.lang_input, code.to_string(), code);
                            }
                        });
                });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    save = ui.button(txt(keys::GUI_SAVE)).clicked();
                    save_units = ui.button(txt(keys::SETTINGS_SAVE_UNITS)).clicked();
                    close = ui.button(txt(keys::GUI_CLOSE)).clicked();
                });
                if let Some(status) = &self.settings_status {
                    ui.label(status.as_str());
                }
            });
        self.show_settings = open && !close;
        if save_units {
            self.remember_all_units();
        }
        if save || save_units {
            self.save_settings();
        }
    }
}

fn success_color() -> egui::Color32 {
    egui::Color32::from_rgb(0x1e, 0x84, 0x49)
}

fn show_result(ui: &mut egui::Ui, tr: &Translator, result: Option<&Result<Solution, CalcError>>) {
    match result {
        Some(Ok(solution)) => {
            ui.colored_label(success_color(), tr.solution(solution));
        }
        Some(Err(e)) => {
            ui.colored_label(ui.visuals().error_fg_color, tr.calc_error(e));
        }
        None => {}
    }
}

fn unit_combo(ui: &mut egui::Ui, id: impl std::hash::Hash, value: &mut String, options: &[&str]) {
    egui::ComboBox::from_id_source(id)
        .selected_text(value.clone())
        .show_ui(ui, |ui| {
            for code in options {
                ui.selectable_value(value, code.to_string(), *code);
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE).into_owned());
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS).into_owned()).clicked() {
                    self.show_settings = true;
                }
            });
        });

        if self.show_settings {
            self.ui_settings_window(ctx);
        }

        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| self.ui_nav(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                Tab::Calculator(calculator) => self.ui_calculator(ui, calculator),
                Tab::MassFromVolume => self.ui_mass_from_volume(ui),
                Tab::UnitConv => self.ui_unit_conv(ui),
            });
        });
    }
}
