//! 辞書バイナリで使われる固定幅の整数型を提供するモジュール
//!
//! ノードのフラグバイトに収まる5ビットの優先度 [`Priority`] と、
//! 3バイトのオフセットポインタを表す [`U24`] を定義します。

/// 0から31までの優先度を表現する型
///
/// フラグバイトの下位5ビットにそのまま格納されます。
/// 値が大きいほど、そのノードを経由する単語の出現頻度が高いことを示します。
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Priority(u8);

impl Priority {
    /// 最小の優先度
    pub const MIN: Self = Self(0);

    /// 最大の優先度(2^5 - 1 = 31)
    ///
    /// 頻度情報を持たない単語リストでは、すべてのノードがこの値になります。
    pub const MAX: Self = Self(0x1f);

    /// 指定されたu8値からPriorityを生成する
    ///
    /// # 例
    ///
    /// ```
    /// # use fxdict::num::Priority;
    /// assert!(Priority::new(31).is_some());
    /// assert!(Priority::new(32).is_none());
    /// ```
    #[inline(always)]
    pub const fn new(x: u8) -> Option<Self> {
        if x <= Self::MAX.get() {
            Some(Self(x))
        } else {
            None
        }
    }

    /// 相対頻度 `f` を `ceil(f * 31)` で優先度に変換します。
    ///
    /// 結果は `[0, 31]` に丸められます。`f` の範囲検証は呼び出し側で行われます。
    ///
    /// ```
    /// # use fxdict::num::Priority;
    /// assert_eq!(Priority::from_frequency(0.8).get(), 25);
    /// assert_eq!(Priority::from_frequency(0.0).get(), 0);
    /// ```
    pub fn from_frequency(f: f64) -> Self {
        let scaled = (f * f64::from(Self::MAX.get())).ceil();
        if scaled.is_nan() || scaled <= 0.0 {
            Self::MIN
        } else if scaled >= f64::from(Self::MAX.get()) {
            Self::MAX
        } else {
            // 0 < scaled < 31 なので切り捨てなしに変換できる
            Self(scaled as u8)
        }
    }

    /// 内部のu8値を取得する
    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// 0から2^24-1までの整数を表現する型
///
/// トライ部の先頭からの絶対オフセットを3バイトのビッグエンディアンで表します。
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct U24(u32);

impl U24 {
    /// U24型で表現可能な最大値(2^24 - 1 = 0xff_ffff)
    pub const MAX: Self = Self(0xff_ffff);

    /// 指定された値が24ビットに収まれば`Some(U24)`を返します。
    #[inline(always)]
    pub fn new(x: usize) -> Option<Self> {
        u32::try_from(x)
            .ok()
            .filter(|&x| x <= Self::MAX.get())
            .map(Self)
    }

    /// 内部のu32値を取得する
    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// ビッグエンディアンの3バイトに変換します。
    #[inline(always)]
    pub const fn to_be_bytes(self) -> [u8; 3] {
        let b = self.0.to_be_bytes();
        [b[1], b[2], b[3]]
    }

    /// ビッグエンディアンの3バイトから復元します。
    #[inline(always)]
    pub const fn from_be_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }
}
