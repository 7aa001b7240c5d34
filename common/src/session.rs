//! 解析ビューの状態管理
//!
//! 画像選択・解析中フラグ・直近の結果を1か所で持つ。
//! ネットワーク呼び出しは持たず、呼び出し側が
//! `begin` → 外部呼び出し → `finish` の順で駆動する。
//!
//! 選択やリセットのたびに世代番号を進め、古い世代のチケットで
//! `finish` された結果は捨てる（前の画像の結果が表示されることはない）。

use crate::analysis::{AnalysisOutcome, AnalysisResult, Detection};
use crate::condition::Category;
use crate::notice::Notice;
use crate::upload::{UploadCandidate, UploadedImage};

/// 左右どちらの眼か
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeSide {
    Left,
    Right,
}

/// 解析中の1回分の呼び出し
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    generation: u64,
    category: Category,
    images: Vec<UploadedImage>,
}

impl AnalysisTicket {
    pub fn category(&self) -> Category {
        self.category
    }

    /// 送信する画像（左右ペアの場合は左、右の順）
    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    category: Category,
    paired: bool,
    /// [0]: 単一画像または左眼, [1]: 右眼
    images: [Option<UploadedImage>; 2],
    analyzing: bool,
    outcome: Option<AnalysisOutcome>,
    generation: u64,
}

impl AnalysisSession {
    /// 画像1枚の解析
    pub fn single(category: Category) -> Self {
        Self::new(category, false)
    }

    /// 左右2枚の解析
    pub fn paired(category: Category) -> Self {
        Self::new(category, true)
    }

    fn new(category: Category, paired: bool) -> Self {
        Self {
            category,
            paired,
            images: [None, None],
            analyzing: false,
            outcome: None,
            generation: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_paired(&self) -> bool {
        self.paired
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.outcome.as_ref().and_then(|o| o.result())
    }

    /// 単一画像（ペアの場合は左眼）
    pub fn image(&self) -> Option<&UploadedImage> {
        self.images[0].as_ref()
    }

    pub fn eye(&self, side: EyeSide) -> Option<&UploadedImage> {
        self.images[slot_index(side)].as_ref()
    }

    /// プレビュー用のData URL
    pub fn preview(&self) -> Option<String> {
        self.image().map(|img| img.data_url())
    }

    /// 画像を選択する
    ///
    /// 画像でなければ [`Notice::NotAnImage`] を返し、状態は変更しない。
    pub fn select_image(&mut self, candidate: UploadCandidate) -> Result<(), Notice> {
        self.store(0, candidate)
    }

    /// 左右ペア解析の片眼を選択する
    pub fn select_eye(&mut self, side: EyeSide, candidate: UploadCandidate) -> Result<(), Notice> {
        if side == EyeSide::Right && !self.paired {
            return Err(Notice::SingleImageOnly);
        }
        self.store(slot_index(side), candidate)
    }

    fn store(&mut self, index: usize, candidate: UploadCandidate) -> Result<(), Notice> {
        let image = candidate.validate().map_err(|_| Notice::NotAnImage)?;
        self.images[index] = Some(image);
        self.invalidate();
        Ok(())
    }

    /// 画像・結果・解析中フラグをすべて破棄する
    pub fn reset(&mut self) {
        self.images = [None, None];
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.outcome = None;
        self.analyzing = false;
        self.generation += 1;
    }

    /// 解析を開始する
    ///
    /// 必要な画像が揃っていなければ通知を返し、外部呼び出しは行わせない。
    pub fn begin(&mut self) -> Result<AnalysisTicket, Notice> {
        if self.analyzing {
            return Err(Notice::AnalysisInProgress);
        }

        let images = match (&self.images, self.paired) {
            ([Some(image), _], false) => vec![image.clone()],
            ([None, _], false) => return Err(self.missing_image_notice()),
            ([Some(left), Some(right)], true) => vec![left.clone(), right.clone()],
            (_, true) => return Err(Notice::SelectBothEyes),
        };

        self.analyzing = true;
        self.outcome = None;

        Ok(AnalysisTicket {
            generation: self.generation,
            category: self.category,
            images,
        })
    }

    fn missing_image_notice(&self) -> Notice {
        match self.category {
            Category::Skin => Notice::SelectImage,
            Category::Eye => Notice::SelectEyeImage,
        }
    }

    /// 外部呼び出しの結果を反映する
    ///
    /// チケット発行後に選択・リセットがあった場合は `None` を返して破棄する。
    pub fn finish(
        &mut self,
        ticket: AnalysisTicket,
        detection: std::result::Result<Detection, String>,
    ) -> Option<&AnalysisOutcome> {
        if ticket.generation != self.generation {
            return None;
        }

        self.analyzing = false;
        self.outcome = Some(AnalysisOutcome::from_detection(detection, ticket.category));
        self.outcome.as_ref()
    }
}

fn slot_index(side: EyeSide) -> usize {
    match side {
        EyeSide::Left => 0,
        EyeSide::Right => 1,
    }
}
